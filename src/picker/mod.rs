mod grid;
mod state;
mod widget;
pub(crate) use self::grid::LeapRule;
pub(crate) use self::state::{DatePickerOutput, DatePickerState};
pub(crate) use self::widget::{CalendarPopup, DatePicker};
