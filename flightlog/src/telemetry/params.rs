//! Telemetry parameter names.

/// Simulator time in seconds. Drives all event and trail timestamps.
pub const TIMESTAMP: &str = "ts";

/// Vertical speed (feet per minute).
pub const VERTICAL_SPEED: &str = "vs";

/// Ground speed.
pub const GROUND_SPEED: &str = "gs";

/// Heading in degrees.
pub const HEADING: &str = "heading";

/// Latitude in degrees.
pub const LATITUDE: &str = "lat";

/// Longitude in degrees.
pub const LONGITUDE: &str = "lng";

/// Altitude above mean sea level.
pub const ELEVATION: &str = "elevation";

/// Height above ground level.
pub const AGL: &str = "agl";

/// Weight on wheels (any gear).
pub const ON_GROUND: &str = "on_ground";

// Named parameters resolved through the accessor when a flight departs.

/// Total fuel weight.
pub const FUEL_WEIGHT: &str = "sim/flightmodel/weight/m_fuel_total";

/// Total aircraft weight.
pub const TOTAL_WEIGHT: &str = "sim/flightmodel/weight/m_total";

/// Aircraft ICAO type designator.
pub const AIRCRAFT_ICAO: &str = "sim/aircraft/view/acf_ICAO";

/// Aircraft name as shown in the simulator UI.
pub const AIRCRAFT_NAME: &str = "sim/aircraft/view/acf_ui_name";

/// Decimal places kept for weights.
pub const WEIGHT_PRECISION: u8 = 1;
