use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(
        "Unknown weekday: '{0}'. Use one of: monday, tuesday, wednesday, thursday, friday, saturday, sunday, or a number 0-6 (0=Monday, 6=Sunday)"
    )]
    InvalidWeekday(String),
}
