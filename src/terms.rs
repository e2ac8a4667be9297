//! Periodic term tables for the Moon's position and the lunar phase series.
//!
//! The position tables are the truncated ELP-2000/82 series as tabulated by
//! Meeus, *Astronomical Algorithms*, chapter 47. The phase tables are the
//! corrections to the mean phases from chapter 49.

/// Multipliers of D, M, M', F for the longitude and distance terms.
#[rustfmt::skip]
pub(crate) const MOON_LR_ARGS: [[i8; 4]; 60] = [
    [0, 0, 1, 0], [2, 0, -1, 0], [2, 0, 0, 0], [0, 0, 2, 0], [0, 1, 0, 0],
    [0, 0, 0, 2], [2, 0, -2, 0], [2, -1, -1, 0], [2, 0, 1, 0], [2, -1, 0, 0],
    [0, 1, -1, 0], [1, 0, 0, 0], [0, 1, 1, 0], [2, 0, 0, -2], [0, 0, 1, 2],
    [0, 0, 1, -2], [4, 0, -1, 0], [0, 0, 3, 0], [4, 0, -2, 0], [2, 1, -1, 0],
    [2, 1, 0, 0], [1, 0, -1, 0], [1, 1, 0, 0], [2, -1, 1, 0], [2, 0, 2, 0],
    [4, 0, 0, 0], [2, 0, -3, 0], [0, 1, -2, 0], [2, 0, -1, 2], [2, -1, -2, 0],
    [1, 0, 1, 0], [2, -2, 0, 0], [0, 1, 2, 0], [0, 2, 0, 0], [2, -2, -1, 0],
    [2, 0, 1, -2], [2, 0, 0, 2], [4, -1, -1, 0], [0, 0, 2, 2], [3, 0, -1, 0],
    [2, 1, 1, 0], [4, -1, -2, 0], [0, 2, -1, 0], [2, 2, -1, 0], [2, 1, -2, 0],
    [2, -1, 0, -2], [4, 0, 1, 0], [0, 0, 4, 0], [4, -1, 0, 0], [1, 0, -2, 0],
    [2, 1, 0, -2], [0, 0, 2, -2], [1, 1, 1, 0], [3, 0, -2, 0], [4, 0, -3, 0],
    [2, -1, 2, 0], [0, 2, 1, 0], [1, 1, -1, 0], [2, 0, 3, 0], [2, 0, -1, -2],
];

/// Coefficients [Σl, Σr] for each row of [`MOON_LR_ARGS`].
///
/// Σl is in 10⁻⁶ degrees (sine terms), Σr in 10⁻³ km (cosine terms).
#[rustfmt::skip]
pub(crate) const MOON_LR_COEFFS: [[f64; 2]; 60] = [
    [6_288_774.0, -20_905_355.0], [1_274_027.0, -3_699_111.0], [658_314.0, -2_955_968.0],
    [213_618.0, -569_925.0], [-185_116.0, 48_888.0], [-114_332.0, -3_149.0],
    [58_793.0, 246_158.0], [57_066.0, -152_138.0], [53_322.0, -170_733.0],
    [45_758.0, -204_586.0], [-40_923.0, -129_620.0], [-34_720.0, 108_743.0],
    [-30_383.0, 104_755.0], [15_327.0, 10_321.0], [-12_528.0, 0.0],
    [10_980.0, 79_661.0], [10_675.0, -34_782.0], [10_034.0, -23_210.0],
    [8_548.0, -21_636.0], [-7_888.0, 24_208.0], [-6_766.0, 30_824.0],
    [-5_163.0, -8_379.0], [4_987.0, -16_675.0], [4_036.0, -12_831.0],
    [3_994.0, -10_445.0], [3_861.0, -11_650.0], [3_665.0, 14_403.0],
    [-2_689.0, -7_003.0], [-2_602.0, 0.0], [2_390.0, 10_056.0],
    [-2_348.0, 6_322.0], [2_236.0, -9_884.0], [-2_120.0, 5_751.0],
    [-2_069.0, 0.0], [2_048.0, -4_950.0], [-1_773.0, 4_130.0],
    [-1_595.0, 0.0], [1_215.0, -3_958.0], [-1_110.0, 0.0],
    [-892.0, 3_258.0], [-810.0, 2_616.0], [759.0, -1_897.0],
    [-713.0, -2_117.0], [-700.0, 2_354.0], [691.0, 0.0],
    [596.0, 0.0], [549.0, -1_423.0], [537.0, -1_117.0],
    [520.0, -1_571.0], [-487.0, -1_739.0], [-399.0, 0.0],
    [-381.0, -4_421.0], [351.0, 0.0], [-340.0, 0.0],
    [330.0, 0.0], [327.0, 0.0], [-323.0, 1_165.0],
    [299.0, 0.0], [294.0, 0.0], [0.0, 8_752.0],
];

/// Multipliers of D, M, M', F for the latitude terms.
#[rustfmt::skip]
pub(crate) const MOON_B_ARGS: [[i8; 4]; 60] = [
    [0, 0, 0, 1], [0, 0, 1, 1], [0, 0, 1, -1], [2, 0, 0, -1], [2, 0, -1, 1],
    [2, 0, -1, -1], [2, 0, 0, 1], [0, 0, 2, 1], [2, 0, 1, -1], [0, 0, 2, -1],
    [2, -1, 0, -1], [2, 0, -2, -1], [2, 0, 1, 1], [2, 1, 0, -1], [2, -1, -1, 1],
    [2, -1, 0, 1], [2, -1, -1, -1], [0, 1, -1, -1], [4, 0, -1, -1], [0, 1, 0, 1],
    [0, 0, 0, 3], [0, 1, -1, 1], [1, 0, 0, 1], [0, 1, 1, 1], [0, 1, 1, -1],
    [0, 1, 0, -1], [1, 0, 0, -1], [0, 0, 3, 1], [4, 0, 0, -1], [4, 0, -1, 1],
    [0, 0, 1, -3], [4, 0, -2, 1], [2, 0, 0, -3], [2, 0, 2, -1], [2, -1, 1, -1],
    [2, 0, -2, 1], [0, 0, 3, -1], [2, 0, 2, 1], [2, 0, -3, -1], [2, 1, -1, 1],
    [2, 1, 0, 1], [4, 0, 0, 1], [2, -1, 1, 1], [2, -2, 0, -1], [0, 0, 1, 3],
    [2, 1, 1, -1], [1, 1, 0, -1], [1, 1, 0, 1], [0, 1, -2, -1], [2, 1, -1, -1],
    [1, 0, 1, 1], [2, -1, -2, -1], [0, 1, 2, 1], [4, 0, -2, -1], [4, -1, -1, -1],
    [1, 0, 1, -1], [4, 0, 1, -1], [1, 0, -1, -1], [4, -1, 0, -1], [2, -2, 0, 1],
];

/// Σb coefficients in 10⁻⁶ degrees for each row of [`MOON_B_ARGS`].
#[rustfmt::skip]
pub(crate) const MOON_B_COEFFS: [f64; 60] = [
    5_128_122.0, 280_602.0, 277_693.0, 173_237.0, 55_413.0,
    46_271.0, 32_573.0, 17_198.0, 9_266.0, 8_822.0,
    8_216.0, 4_324.0, 4_200.0, -3_359.0, 2_463.0,
    2_211.0, 2_065.0, -1_870.0, 1_828.0, -1_794.0,
    -1_749.0, -1_565.0, -1_491.0, -1_475.0, -1_410.0,
    -1_344.0, -1_335.0, 1_107.0, 1_021.0, 833.0,
    777.0, 671.0, 607.0, 596.0, 491.0,
    -451.0, 439.0, 422.0, 421.0, -366.0,
    -351.0, 331.0, 315.0, 302.0, -283.0,
    -229.0, 223.0, 223.0, -220.0, -220.0,
    -185.0, 181.0, -177.0, 176.0, 166.0,
    -164.0, 132.0, -119.0, 115.0, 107.0,
];

/// One correction term of the phase series:
/// `[coefficient, power of E, ×M, ×M', ×F, ×Ω]`.
pub(crate) type PhaseTerm = [f64; 6];

/// Corrections (days) to the mean New Moon.
#[rustfmt::skip]
pub(crate) const NEW_MOON_TERMS: [PhaseTerm; 25] = [
    [-0.40720, 0.0, 0.0, 1.0, 0.0, 0.0],
    [0.17241, 1.0, 1.0, 0.0, 0.0, 0.0],
    [0.01608, 0.0, 0.0, 2.0, 0.0, 0.0],
    [0.01039, 0.0, 0.0, 0.0, 2.0, 0.0],
    [0.00739, 1.0, -1.0, 1.0, 0.0, 0.0],
    [-0.00514, 1.0, 1.0, 1.0, 0.0, 0.0],
    [0.00208, 2.0, 2.0, 0.0, 0.0, 0.0],
    [-0.00111, 0.0, 0.0, 1.0, -2.0, 0.0],
    [-0.00057, 0.0, 0.0, 1.0, 2.0, 0.0],
    [0.00056, 1.0, 1.0, 2.0, 0.0, 0.0],
    [-0.00042, 0.0, 0.0, 3.0, 0.0, 0.0],
    [0.00042, 1.0, 1.0, 0.0, 2.0, 0.0],
    [0.00038, 1.0, 1.0, 0.0, -2.0, 0.0],
    [-0.00024, 1.0, -1.0, 2.0, 0.0, 0.0],
    [-0.00017, 0.0, 0.0, 0.0, 0.0, 1.0],
    [-0.00007, 0.0, 2.0, 1.0, 0.0, 0.0],
    [0.00004, 0.0, 0.0, 2.0, -2.0, 0.0],
    [0.00004, 0.0, 3.0, 0.0, 0.0, 0.0],
    [0.00003, 0.0, 1.0, 1.0, -2.0, 0.0],
    [0.00003, 0.0, 0.0, 2.0, 2.0, 0.0],
    [-0.00003, 0.0, 1.0, 1.0, 2.0, 0.0],
    [0.00003, 0.0, -1.0, 1.0, 2.0, 0.0],
    [-0.00002, 0.0, -1.0, 1.0, -2.0, 0.0],
    [-0.00002, 0.0, 1.0, 3.0, 0.0, 0.0],
    [0.00002, 0.0, 0.0, 4.0, 0.0, 0.0],
];

/// Corrections (days) to the mean Full Moon.
#[rustfmt::skip]
pub(crate) const FULL_MOON_TERMS: [PhaseTerm; 25] = [
    [-0.40614, 0.0, 0.0, 1.0, 0.0, 0.0],
    [0.17302, 1.0, 1.0, 0.0, 0.0, 0.0],
    [0.01614, 0.0, 0.0, 2.0, 0.0, 0.0],
    [0.01043, 0.0, 0.0, 0.0, 2.0, 0.0],
    [0.00734, 1.0, -1.0, 1.0, 0.0, 0.0],
    [-0.00515, 1.0, 1.0, 1.0, 0.0, 0.0],
    [0.00209, 2.0, 2.0, 0.0, 0.0, 0.0],
    [-0.00111, 0.0, 0.0, 1.0, -2.0, 0.0],
    [-0.00057, 0.0, 0.0, 1.0, 2.0, 0.0],
    [0.00056, 1.0, 1.0, 2.0, 0.0, 0.0],
    [-0.00042, 0.0, 0.0, 3.0, 0.0, 0.0],
    [0.00042, 1.0, 1.0, 0.0, 2.0, 0.0],
    [0.00038, 1.0, 1.0, 0.0, -2.0, 0.0],
    [-0.00024, 1.0, -1.0, 2.0, 0.0, 0.0],
    [-0.00017, 0.0, 0.0, 0.0, 0.0, 1.0],
    [-0.00007, 0.0, 2.0, 1.0, 0.0, 0.0],
    [0.00004, 0.0, 0.0, 2.0, -2.0, 0.0],
    [0.00004, 0.0, 3.0, 0.0, 0.0, 0.0],
    [0.00003, 0.0, 1.0, 1.0, -2.0, 0.0],
    [0.00003, 0.0, 0.0, 2.0, 2.0, 0.0],
    [-0.00003, 0.0, 1.0, 1.0, 2.0, 0.0],
    [0.00003, 0.0, -1.0, 1.0, 2.0, 0.0],
    [-0.00002, 0.0, -1.0, 1.0, -2.0, 0.0],
    [-0.00002, 0.0, 1.0, 3.0, 0.0, 0.0],
    [0.00002, 0.0, 0.0, 4.0, 0.0, 0.0],
];

/// Corrections (days) to the mean First and Last Quarter.
#[rustfmt::skip]
pub(crate) const QUARTER_TERMS: [PhaseTerm; 25] = [
    [-0.62801, 0.0, 0.0, 1.0, 0.0, 0.0],
    [0.17172, 1.0, 1.0, 0.0, 0.0, 0.0],
    [-0.01183, 1.0, 1.0, 1.0, 0.0, 0.0],
    [0.00862, 0.0, 0.0, 2.0, 0.0, 0.0],
    [0.00804, 0.0, 0.0, 0.0, 2.0, 0.0],
    [0.00454, 1.0, -1.0, 1.0, 0.0, 0.0],
    [0.00204, 2.0, 2.0, 0.0, 0.0, 0.0],
    [-0.00180, 0.0, 0.0, 1.0, -2.0, 0.0],
    [-0.00070, 0.0, 0.0, 1.0, 2.0, 0.0],
    [-0.00040, 0.0, 0.0, 3.0, 0.0, 0.0],
    [-0.00034, 1.0, -1.0, 2.0, 0.0, 0.0],
    [0.00032, 1.0, 1.0, 0.0, 2.0, 0.0],
    [0.00032, 1.0, 1.0, 0.0, -2.0, 0.0],
    [-0.00028, 2.0, 2.0, 1.0, 0.0, 0.0],
    [0.00027, 1.0, 1.0, 2.0, 0.0, 0.0],
    [-0.00017, 0.0, 0.0, 0.0, 0.0, 1.0],
    [-0.00005, 0.0, -1.0, 1.0, -2.0, 0.0],
    [0.00004, 0.0, 0.0, 2.0, 2.0, 0.0],
    [-0.00004, 0.0, 1.0, 1.0, 2.0, 0.0],
    [0.00004, 0.0, -2.0, 1.0, 0.0, 0.0],
    [0.00003, 0.0, 1.0, 1.0, -2.0, 0.0],
    [0.00003, 0.0, 3.0, 0.0, 0.0, 0.0],
    [0.00002, 0.0, 0.0, 2.0, -2.0, 0.0],
    [0.00002, 0.0, -1.0, 1.0, 2.0, 0.0],
    [-0.00002, 0.0, 1.0, 3.0, 0.0, 0.0],
];

/// Quarter-phase W correction: `[coefficient, power of E, ×M, ×M', ×F]`,
/// cosine terms. Added for First Quarter, subtracted for Last Quarter.
#[rustfmt::skip]
pub(crate) const QUARTER_W_TERMS: [[f64; 5]; 6] = [
    [0.00306, 0.0, 0.0, 0.0, 0.0],
    [-0.00038, 1.0, 1.0, 0.0, 0.0],
    [0.00026, 0.0, 0.0, 1.0, 0.0],
    [-0.00002, 0.0, -1.0, 1.0, 0.0],
    [0.00002, 0.0, 1.0, 1.0, 0.0],
    [0.00002, 0.0, 0.0, 0.0, 2.0],
];

/// Planetary arguments A1..A14 common to all phases:
/// `[base (deg), rate per lunation k (deg), coefficient (days)]`.
/// A1 additionally carries `-0.009173 T²`.
#[rustfmt::skip]
pub(crate) const PLANETARY_TERMS: [[f64; 3]; 14] = [
    [299.77, 0.107408, 0.000325],
    [251.88, 0.016321, 0.000165],
    [251.83, 26.651886, 0.000164],
    [349.42, 36.412478, 0.000126],
    [84.66, 18.206239, 0.000110],
    [141.74, 53.303771, 0.000062],
    [207.14, 2.453732, 0.000060],
    [154.84, 7.306860, 0.000056],
    [34.52, 27.261239, 0.000047],
    [207.19, 0.121824, 0.000042],
    [291.34, 1.844379, 0.000040],
    [161.72, 24.198154, 0.000037],
    [239.56, 25.513099, 0.000035],
    [331.55, 3.592518, 0.000023],
];
