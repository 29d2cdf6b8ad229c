mod tests {
    use approx::assert_relative_eq;

    use crate::length::{Length, AU_M, EARTH_RADIUS_M, SOLAR_RADIUS_M};

    #[test]
    fn test_length_conversions() {
        assert_relative_eq!(Length::from_au(1.0).to_m(), AU_M);
        assert_relative_eq!(Length::from_m(AU_M).to_au(), 1.0);
        assert_relative_eq!(Length::from_earth_radii(2.0).to_m(), 2.0 * EARTH_RADIUS_M);
        assert_relative_eq!(Length::from_solar_radii(1.0).to_km(), SOLAR_RADIUS_M / 1000.0);

        // About 109 Earths fit across the Sun
        let ratio = Length::from_solar_radii(1.0).to_earth_radii();
        assert_relative_eq!(ratio, 109.2, epsilon = 0.1);
    }

    #[test]
    fn test_length_arithmetic_operations() {
        let length1 = Length::from_km(5.0);
        let length2 = Length::from_km(3.0);

        assert_relative_eq!((length1 + length2).to_km(), 8.0);
        assert_relative_eq!((length1 - length2).to_km(), 2.0);
        assert_relative_eq!((length1 * 2.0).to_km(), 10.0);
        assert_relative_eq!(length1 / length2, 5.0 / 3.0);
    }
}
