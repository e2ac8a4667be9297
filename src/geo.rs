#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::{
    math::{cos_deg, normalize_degrees_360, polynomial, sin_deg},
    terms::{MOON_B_ARGS, MOON_B_COEFFS, MOON_LR_ARGS, MOON_LR_COEFFS},
};

// ============================================================================
// Constants
// ============================================================================

/// Mean Earth–Moon distance in kilometres, the constant term of the distance series
const MOON_MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Astronomical unit in kilometres
const ASTRONOMICAL_UNIT_KM: f64 = 149_597_870.7;

/// Scaling factor of the Σl and Σb periodic terms (10⁻⁶ degrees)
const LUNAR_TERM_SCALE_FACTOR: f64 = 1.0e6;

/// Scaling factor of the Σr periodic terms (10⁻³ km)
const LUNAR_DISTANCE_SCALE_FACTOR: f64 = 1.0e3;

/// Aberration of the Sun's longitude in degrees
const SOLAR_ABERRATION: f64 = 0.00569;

// ============================================================================
// Lunar Fundamental Arguments
// ============================================================================

/// Calculates the Moon's mean longitude L'.
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
///
/// # Returns
/// Mean longitude in degrees (0° to 360°)
pub(crate) fn calculate_moon_mean_longitude(julian_century: f64) -> f64 {
    normalize_degrees_360(polynomial(
        &[
            218.316_447_7,
            481_267.881_234_21,
            -0.001_578_6,
            1.0 / 538_841.0,
            -1.0 / 65_194_000.0,
        ],
        julian_century,
    ))
}

/// Calculates the mean elongation of the Moon from the Sun (D).
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
///
/// # Returns
/// Mean elongation in degrees (0° to 360°)
pub(crate) fn calculate_mean_elongation_moon_sun(julian_century: f64) -> f64 {
    normalize_degrees_360(polynomial(
        &[
            297.850_192_1,
            445_267.111_403_4,
            -0.001_881_9,
            1.0 / 545_868.0,
            -1.0 / 113_065_000.0,
        ],
        julian_century,
    ))
}

/// Calculates the mean anomaly of the Sun (M).
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
///
/// # Returns
/// Mean anomaly in degrees (0° to 360°)
pub(crate) fn calculate_mean_anomaly_sun(julian_century: f64) -> f64 {
    normalize_degrees_360(polynomial(
        &[357.529_109_2, 35_999.050_290_9, -0.000_153_6, 1.0 / 24_490_000.0],
        julian_century,
    ))
}

/// Calculates the mean anomaly of the Moon (M').
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
///
/// # Returns
/// Mean anomaly in degrees (0° to 360°)
pub(crate) fn calculate_mean_anomaly_moon(julian_century: f64) -> f64 {
    normalize_degrees_360(polynomial(
        &[
            134.963_396_4,
            477_198.867_505_5,
            0.008_741_4,
            1.0 / 69_699.0,
            -1.0 / 14_712_000.0,
        ],
        julian_century,
    ))
}

/// Calculates the Moon's argument of latitude (F).
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
///
/// # Returns
/// Argument of latitude in degrees (0° to 360°)
pub(crate) fn calculate_argument_latitude_moon(julian_century: f64) -> f64 {
    normalize_degrees_360(polynomial(
        &[
            93.272_095_0,
            483_202.017_523_3,
            -0.003_653_9,
            -1.0 / 3_526_000.0,
            1.0 / 863_310_000.0,
        ],
        julian_century,
    ))
}

/// Eccentricity factor E of Earth's orbit.
///
/// Terms whose argument contains the Sun's mean anomaly M are multiplied by
/// E (or E² when M appears twice) to account for the slowly decreasing
/// eccentricity.
pub(crate) fn calculate_eccentricity_factor(julian_century: f64) -> f64 {
    polynomial(&[1.0, -0.002_516, -0.000_007_4], julian_century)
}

// ============================================================================
// Lunar Position
// ============================================================================

/// Geocentric position of the Moon.
///
/// # Fields
///
/// - `longitude`: Ecliptic longitude in degrees, mean equinox of date (0° to 360°)
/// - `latitude`: Ecliptic latitude in degrees
/// - `distance_km`: Distance between the centers of Earth and Moon in kilometres
#[derive(Copy, Clone, Debug)]
pub(crate) struct MoonPosition {
    pub(crate) longitude: f64,
    pub(crate) latitude: f64,
    pub(crate) distance_km: f64,
}

impl MoonPosition {
    /// Evaluates the periodic series for a Julian ephemeris century.
    pub(crate) fn new(julian_century: f64) -> Self {
        let mean_longitude = calculate_moon_mean_longitude(julian_century);
        let elongation = calculate_mean_elongation_moon_sun(julian_century);
        let sun_anomaly = calculate_mean_anomaly_sun(julian_century);
        let moon_anomaly = calculate_mean_anomaly_moon(julian_century);
        let argument_latitude = calculate_argument_latitude_moon(julian_century);
        let eccentricity = calculate_eccentricity_factor(julian_century);
        let fundamental_arguments = [elongation, sun_anomaly, moon_anomaly, argument_latitude];

        let (mut sum_longitude, sum_distance) =
            calculate_longitude_distance_terms(fundamental_arguments, eccentricity);
        let mut sum_latitude = calculate_latitude_terms(fundamental_arguments, eccentricity);

        // Venus, Jupiter and Earth-flattening perturbations
        let a1 = 119.75 + 131.849 * julian_century;
        let a2 = 53.09 + 479_264.290 * julian_century;
        let a3 = 313.45 + 481_266.484 * julian_century;
        sum_longitude += 3958.0 * sin_deg(a1) + 1962.0 * sin_deg(mean_longitude - argument_latitude) + 318.0 * sin_deg(a2);
        sum_latitude += -2235.0 * sin_deg(mean_longitude)
            + 382.0 * sin_deg(a3)
            + 175.0 * sin_deg(a1 - argument_latitude)
            + 175.0 * sin_deg(a1 + argument_latitude)
            + 127.0 * sin_deg(mean_longitude - moon_anomaly)
            - 115.0 * sin_deg(mean_longitude + moon_anomaly);

        MoonPosition {
            longitude: normalize_degrees_360(mean_longitude + sum_longitude / LUNAR_TERM_SCALE_FACTOR),
            latitude: sum_latitude / LUNAR_TERM_SCALE_FACTOR,
            distance_km: MOON_MEAN_DISTANCE_KM + sum_distance / LUNAR_DISTANCE_SCALE_FACTOR,
        }
    }
}

/// Argument of one periodic term and its eccentricity weight.
///
/// # Arguments
/// * `multipliers` - Multipliers of [D, M, M', F]
/// * `fundamental_arguments` - [D, M, M', F] in degrees
/// * `eccentricity` - Eccentricity factor E
///
/// # Returns
/// Tuple of (argument in degrees, E^|multiplier of M|)
fn calculate_term_argument(multipliers: &[i8; 4], fundamental_arguments: [f64; 4], eccentricity: f64) -> (f64, f64) {
    let argument = multipliers
        .iter()
        .zip(fundamental_arguments)
        .fold(0.0, |accumulator, (&multiplier, value)| {
            accumulator + f64::from(multiplier) * value
        });
    let weight = match multipliers[1].abs() {
        0 => 1.0,
        1 => eccentricity,
        _ => eccentricity * eccentricity,
    };
    (argument, weight)
}

/// Sums the longitude (sine) and distance (cosine) periodic terms.
///
/// # Returns
/// Tuple of (Σl in 10⁻⁶ degrees, Σr in 10⁻³ km)
fn calculate_longitude_distance_terms(fundamental_arguments: [f64; 4], eccentricity: f64) -> (f64, f64) {
    MOON_LR_ARGS
        .iter()
        .zip(MOON_LR_COEFFS.iter())
        .fold((0.0, 0.0), |(sum_l, sum_r), (multipliers, coefficients)| {
            let (argument, weight) = calculate_term_argument(multipliers, fundamental_arguments, eccentricity);
            (
                sum_l + coefficients[0] * weight * sin_deg(argument),
                sum_r + coefficients[1] * weight * cos_deg(argument),
            )
        })
}

/// Sums the latitude periodic terms.
///
/// # Returns
/// Σb in 10⁻⁶ degrees
fn calculate_latitude_terms(fundamental_arguments: [f64; 4], eccentricity: f64) -> f64 {
    MOON_B_ARGS
        .iter()
        .zip(MOON_B_COEFFS.iter())
        .fold(0.0, |sum_b, (multipliers, coefficient)| {
            let (argument, weight) = calculate_term_argument(multipliers, fundamental_arguments, eccentricity);
            sum_b + coefficient * weight * sin_deg(argument)
        })
}

// ============================================================================
// Solar Position
// ============================================================================

/// Geocentric position of the Sun.
///
/// # Fields
///
/// - `longitude`: Ecliptic longitude corrected for aberration, mean equinox of date (0° to 360°)
/// - `distance_km`: Earth–Sun distance in kilometres
#[derive(Copy, Clone, Debug)]
pub(crate) struct SunPosition {
    pub(crate) longitude: f64,
    pub(crate) distance_km: f64,
}

impl SunPosition {
    /// Evaluates the low-precision solar theory for a Julian ephemeris century.
    ///
    /// Accurate to about 0.01°, which is well inside what the lunar phase
    /// quantities need.
    pub(crate) fn new(julian_century: f64) -> Self {
        let mean_longitude = calculate_sun_mean_longitude(julian_century);
        let mean_anomaly = polynomial(&[357.529_11, 35_999.050_29, -0.000_153_7], julian_century);
        let eccentricity = polynomial(&[0.016_708_634, -0.000_042_037, -0.000_000_126_7], julian_century);
        let center = calculate_sun_equation_of_center(julian_century, mean_anomaly);

        let true_anomaly = mean_anomaly + center;
        let radius_au =
            1.000_001_018 * (1.0 - eccentricity * eccentricity) / (1.0 + eccentricity * cos_deg(true_anomaly));

        SunPosition {
            longitude: normalize_degrees_360(mean_longitude + center - SOLAR_ABERRATION),
            distance_km: radius_au * ASTRONOMICAL_UNIT_KM,
        }
    }
}

/// Calculates the geometric mean longitude of the Sun.
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
///
/// # Returns
/// Mean longitude in degrees (0° to 360°)
pub(crate) fn calculate_sun_mean_longitude(julian_century: f64) -> f64 {
    normalize_degrees_360(polynomial(&[280.466_46, 36_000.769_83, 0.000_303_2], julian_century))
}

/// Calculates the Sun's equation of the center.
///
/// # Arguments
/// * `julian_century` - Julian ephemeris century
/// * `mean_anomaly` - Mean anomaly of the Sun in degrees
///
/// # Returns
/// Equation of the center in degrees
pub(crate) fn calculate_sun_equation_of_center(julian_century: f64, mean_anomaly: f64) -> f64 {
    polynomial(&[1.914_602, -0.004_817, -0.000_014], julian_century) * sin_deg(mean_anomaly)
        + polynomial(&[0.019_993, -0.000_101], julian_century) * sin_deg(2.0 * mean_anomaly)
        + 0.000_289 * sin_deg(3.0 * mean_anomaly)
}

// ============================================================================
// Phase Geometry
// ============================================================================

/// Calculates the lunar phase angle as the Moon−Sun ecliptic longitude difference.
///
/// # Returns
/// Phase angle in degrees (0° to 360°): 0° at New Moon, 90° at First Quarter,
/// 180° at Full Moon, 270° at Last Quarter
pub(crate) fn calculate_phase_angle(moon: &MoonPosition, sun: &SunPosition) -> f64 {
    normalize_degrees_360(moon.longitude - sun.longitude)
}

/// Calculates the illuminated fraction of the Moon's disk.
///
/// The geocentric elongation ψ gives the selenocentric Sun–Moon–Earth angle
/// `i`, and the fraction is `(1 + cos i) / 2`.
///
/// # Returns
/// Illuminated fraction in [0, 1]
pub(crate) fn calculate_illuminated_fraction(moon: &MoonPosition, sun: &SunPosition) -> f64 {
    let elongation = (cos_deg(moon.latitude) * cos_deg(moon.longitude - sun.longitude))
        .clamp(-1.0, 1.0)
        .acos();
    let selenocentric_angle =
        (sun.distance_km * elongation.sin()).atan2(moon.distance_km - sun.distance_km * elongation.cos());
    ((1.0 + selenocentric_angle.cos()) / 2.0).clamp(0.0, 1.0)
}
