mod holiday;
pub use self::holiday::Holiday;
