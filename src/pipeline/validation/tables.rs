//! Engineering reference data used by the validation rules.

/// Standard rated voltages `U` in volts (IEC 60038 series plus common
/// building-wire grades).
pub const VOLTAGE_SERIES_V: &[f64] = &[
    300.0, 450.0, 500.0, 600.0, 750.0, 1000.0, 1100.0, 3000.0, 3300.0, 3600.0, 6000.0, 6600.0,
    10000.0, 11000.0, 15000.0, 20000.0, 22000.0, 30000.0, 33000.0, 35000.0,
];

/// Nominal conductor cross-sections of IEC 60228, mm².
pub const NOMINAL_SIZES_MM2: &[f64] = &[
    0.5, 0.75, 1.0, 1.5, 2.5, 4.0, 6.0, 10.0, 16.0, 25.0, 35.0, 50.0, 70.0, 95.0, 120.0, 150.0,
    185.0, 240.0, 300.0, 400.0, 500.0, 630.0, 800.0, 1000.0,
];

pub const MIN_SIZE_MM2: f64 = 0.5;
pub const MAX_SIZE_MM2: f64 = 1000.0;
pub const MAX_CURRENT_A: f64 = 5000.0;
pub const MIN_TEMPERATURE_C: f64 = -60.0;
pub const MAX_TEMPERATURE_C: f64 = 300.0;
pub const MAX_CORES: u32 = 61;

/// Smallest conductor allowed for a rated voltage: `(max U in volts, min mm²)`.
pub const MIN_SIZE_FOR_VOLTAGE: &[(f64, f64)] = &[
    (1100.0, 0.5),
    (6600.0, 10.0),
    (11000.0, 16.0),
    (22000.0, 25.0),
    (35000.0, 50.0),
];

/// Continuous current capacity of copper conductors in air, `(mm², A)`.
pub const COPPER_AMPACITY: &[(f64, f64)] = &[
    (0.5, 12.0),
    (0.75, 15.0),
    (1.0, 19.0),
    (1.5, 24.0),
    (2.5, 33.0),
    (4.0, 45.0),
    (6.0, 58.0),
    (10.0, 80.0),
    (16.0, 107.0),
    (25.0, 138.0),
    (35.0, 171.0),
    (50.0, 209.0),
    (70.0, 269.0),
    (95.0, 328.0),
    (120.0, 382.0),
    (150.0, 441.0),
    (185.0, 506.0),
    (240.0, 599.0),
    (300.0, 693.0),
    (400.0, 825.0),
    (500.0, 946.0),
    (630.0, 1088.0),
    (800.0, 1214.0),
    (1000.0, 1334.0),
];

pub const ALUMINIUM_DERATING: f64 = 0.78;

/// Maximum continuous conductor temperature per insulation, °C.
pub const INSULATION_MAX_TEMPERATURE_C: &[(&str, f64)] = &[
    ("PVC", 90.0),
    ("XLPE", 90.0),
    ("EPR", 90.0),
    ("HEPR", 90.0),
    ("LSZH", 90.0),
    ("PE", 70.0),
    ("XLPO", 120.0),
    ("SILICONE RUBBER", 180.0),
    ("FEP", 200.0),
    ("PTFE", 260.0),
];

/// Highest rated voltage `U` per insulation, volts. Unlisted materials have no limit.
pub const INSULATION_MAX_VOLTAGE_V: &[(&str, f64)] = &[
    ("PVC", 6000.0),
    ("LSZH", 1000.0),
    ("SILICONE RUBBER", 1000.0),
    ("PTFE", 1000.0),
    ("FEP", 1000.0),
];

/// Minimum size for a voltage, `None` above the highest class.
pub fn min_size_for_voltage(u: f64) -> Option<f64> {
    MIN_SIZE_FOR_VOLTAGE
        .iter()
        .find(|(max_u, _)| u <= *max_u)
        .map(|(_, size)| *size)
}

/// Tabulated copper capacity for the largest listed size not above `size`.
pub fn copper_ampacity(size: f64) -> Option<f64> {
    COPPER_AMPACITY
        .iter()
        .rev()
        .find(|(s, _)| *s <= size)
        .map(|(_, amps)| *amps)
}

pub fn lookup(table: &[(&str, f64)], material: &str) -> Option<f64> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(material))
        .map(|(_, limit)| *limit)
}

pub fn is_standard_voltage(u: f64) -> bool {
    VOLTAGE_SERIES_V.iter().any(|v| (v - u).abs() < 1e-6)
}

pub fn is_nominal_size(size: f64) -> bool {
    NOMINAL_SIZES_MM2.iter().any(|s| (s - size).abs() < 1e-6)
}
