mod tests {
    use approx::assert_relative_eq;

    use crate::time::{Time, DAYS_PER_YEAR, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_YEAR};

    #[test]
    fn test_time_conversions() {
        // Days to seconds, the conversion input forms rely on
        let step = Time::from_days(1.0);
        assert_relative_eq!(step.to_seconds(), SECONDS_PER_DAY);
        assert_relative_eq!(Time::from_seconds(SECONDS_PER_DAY).to_days(), 1.0);

        // Years
        let year = Time::from_years(1.0);
        assert_relative_eq!(year.to_seconds(), SECONDS_PER_YEAR);
        assert_relative_eq!(year.to_days(), DAYS_PER_YEAR);

        // Hours
        let hours = Time::from_hours(36.0);
        assert_relative_eq!(hours.to_seconds(), 36.0 * SECONDS_PER_HOUR);
        assert_relative_eq!(hours.to_days(), 1.5);
    }

    #[test]
    fn test_time_arithmetic_operations() {
        let a = Time::from_days(10.0);
        let b = Time::from_days(5.0);

        assert_relative_eq!((a + b).to_days(), 15.0);
        assert_relative_eq!((a * 3.0).to_days(), 30.0);
        assert_relative_eq!((a / 4.0).to_days(), 2.5);
        assert_relative_eq!(a / b, 2.0);
    }
}
