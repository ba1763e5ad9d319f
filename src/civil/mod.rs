/*!
Civil calendar types and algorithms for the proleptic Gregorian calendar.

The central type of this module is [`Date`], a year/month/day triple that
may be invalid. Calendar arithmetic on dates changes only the year and month
fields, which keeps the results predictable: repairing an invalid result is
a separate and explicit step, with a policy of the caller's choosing (see
[`Overflow`]).

Conversion between dates and time points goes through the serial day
number: the number of days since `1970-01-01`. The algorithms used for this
are exact over the whole range of [`Year`], and they extend linearly over
invalid dates. That is, `2001-02-29` has the same serial day number as
`2001-03-01`.

# Example

This shows how to find the second Sunday of March, then round trip it
through the system time line:

```
use calends::civil::{Date, Month, Weekday, Year};

let date = Weekday::Sunday.nth(2).in_month(Year::new(2024), Month::MARCH);
assert_eq!(date, Date::new(2024, 3, 10));
assert_eq!(Date::from(date.to_sys_days()), date);
assert_eq!(date.to_sys_days().since_epoch().count(), 19_792);
```
*/

pub use self::{
    date::{Date, Overflow},
    fields::{Day, Month, Year, YearMonthLast},
    gregorian::{civil_from_days, days_from_civil, days_in_month, is_leap_year},
    time::TimeOfDay,
    weekday::{LastWeekday, NthWeekday, Weekday},
};

mod date;
mod fields;
pub(crate) mod gregorian;
mod time;
mod weekday;
