pub mod ical;
pub mod jcal;
