use thiserror::Error;
use time::{Date, Month, Month::*, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Number of week rows in every month grid, enough for a 31-day month that
/// starts on a Sunday
pub(crate) const WEEK_ROWS: usize = 6;

pub(crate) const GRID_CELLS: usize = DAYS_IN_WEEK * WEEK_ROWS;

/// Rule used to decide how many days February has
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum LeapRule {
    /// Every year divisible by four is a leap year, century years included
    #[default]
    Quadrennial,
    /// Proleptic Gregorian rule: century years are leap years only when
    /// divisible by 400
    Gregorian,
}

impl LeapRule {
    pub(crate) fn is_leap_year(self, year: i32) -> bool {
        match self {
            LeapRule::Quadrennial => year % 4 == 0,
            LeapRule::Gregorian => time::util::is_leap_year(year),
        }
    }

    pub(crate) fn days_in_month(self, year: i32, month: Month) -> u8 {
        match month {
            January | March | May | July | August | October | December => 31,
            April | June | September | November => 30,
            February => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub(crate) struct OutOfTimeError;

/// The month currently displayed by the popup.
///
/// Internally this is the first day of that month, which keeps the year
/// within the range `time::Date` can represent.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cursor(Date);

impl Cursor {
    pub(crate) fn new(year: i32, month: Month) -> Result<Cursor, OutOfTimeError> {
        Date::from_calendar_date(year, month, 1)
            .map(Cursor)
            .map_err(|_| OutOfTimeError)
    }

    pub(crate) fn containing(date: Date) -> Cursor {
        Cursor(date.replace_day(1).unwrap_or(date))
    }

    pub(crate) fn year(self) -> i32 {
        self.0.year()
    }

    pub(crate) fn month(self) -> Month {
        self.0.month()
    }

    pub(crate) fn first_weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub(crate) fn contains(self, date: Date) -> bool {
        self.year() == date.year() && self.month() == date.month()
    }

    pub(crate) fn next_month(self) -> Result<Cursor, OutOfTimeError> {
        let year = if self.month() == December {
            self.year().checked_add(1).ok_or(OutOfTimeError)?
        } else {
            self.year()
        };
        Cursor::new(year, self.month().next())
    }

    pub(crate) fn previous_month(self) -> Result<Cursor, OutOfTimeError> {
        let (year, month) = self.previous_year_month();
        Cursor::new(year, month)
    }

    pub(crate) fn next_year(self) -> Result<Cursor, OutOfTimeError> {
        Cursor::new(
            self.year().checked_add(1).ok_or(OutOfTimeError)?,
            self.month(),
        )
    }

    pub(crate) fn previous_year(self) -> Result<Cursor, OutOfTimeError> {
        Cursor::new(
            self.year().checked_sub(1).ok_or(OutOfTimeError)?,
            self.month(),
        )
    }

    // Not bounds-checked, as only the month's length is needed for the
    // leading padding cells
    fn previous_year_month(self) -> (i32, Month) {
        if self.month() == January {
            (self.year().saturating_sub(1), December)
        } else {
            (self.year(), self.month().previous())
        }
    }

    /// Toolbar label, e.g. `2023-11`.  Years before 1 BCE get a leading
    /// minus sign ahead of the zero padding, e.g. `-0001-03`.
    pub(crate) fn label(self) -> String {
        let year = self.year();
        let sign = if year < 0 { "-" } else { "" };
        format!("{sign}{:04}-{:02}", year.unsigned_abs(), u8::from(self.month()))
    }

    /// Selection string for the given day of the displayed month, e.g.
    /// `2023-11-05`
    pub(crate) fn format_day(self, day: u8) -> String {
        format!("{}-{day:02}", self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) day: u8,
    /// `false` for padding cells borrowed from the adjacent months
    pub(crate) enabled: bool,
}

impl DayCell {
    fn current(day: u8) -> DayCell {
        DayCell { day, enabled: true }
    }

    fn padding(day: u8) -> DayCell {
        DayCell {
            day,
            enabled: false,
        }
    }
}

/// The 6×7 grid of days displayed for a month, weeks starting on Monday
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid([DayCell; GRID_CELLS]);

impl MonthGrid {
    pub(crate) fn new(cursor: Cursor, rule: LeapRule) -> MonthGrid {
        let leading = cursor.first_weekday().number_from_monday() - 1;
        let (prev_year, prev_month) = cursor.previous_year_month();
        let prev_len = rule.days_in_month(prev_year, prev_month);
        let len = rule.days_in_month(cursor.year(), cursor.month());
        let days = (prev_len + 1 - leading..=prev_len)
            .map(DayCell::padding)
            .chain((1..=len).map(DayCell::current))
            .chain((1..).map(DayCell::padding));
        let mut cells = [DayCell::default(); GRID_CELLS];
        for (slot, cell) in cells.iter_mut().zip(days) {
            *slot = cell;
        }
        MonthGrid(cells)
    }

    pub(crate) fn get(&self, index: usize) -> Option<DayCell> {
        self.0.get(index).copied()
    }

    pub(crate) fn weeks(&self) -> impl Iterator<Item = &[DayCell]> + '_ {
        self.0.chunks_exact(DAYS_IN_WEEK)
    }
}
