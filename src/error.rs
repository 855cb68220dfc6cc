//! Error types for shot-sequencer.
//!
//! Provides unified error handling across configuration, actuator control,
//! session sequencing and profile persistence.
//!
//! Confirmation timeouts are deliberately absent: a late HLFB edge is reported
//! as a `false` confirmation flag, never as an error.

use core::fmt;

use crate::actuator::ActuatorId;
use crate::sequencing::SessionState;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all shot-sequencer operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Actuator driver error
    Actuator(ActuatorError),
    /// Session state machine error
    Session(SessionError),
    /// Drill or goalie profile error
    Profile(ProfileError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Degrees per pulse must be > 0
    InvalidDegreesPerPulse(f32),
    /// Flywheel diameter must be > 0
    InvalidFlywheelDiameter(f32),
    /// Flywheel max RPM must be > 0
    InvalidMaxRpm(f32),
    /// A timing constant that must be non-zero was zero
    ZeroDuration(&'static str),
    /// Actuator order is not a permutation of all six actuators
    IncompleteOrder {
        /// Which order list is wrong
        list: &'static str,
        /// First actuator missing from the list
        missing: ActuatorId,
    },
    /// Actuator listed twice in an order
    DuplicateInOrder {
        /// Which order list is wrong
        list: &'static str,
        /// Repeated actuator
        actuator: ActuatorId,
    },
    /// Aim table does not cover every zone
    IncompleteAimTable(heapless::String<32>),
    /// Two aim tables share a standoff distance
    DuplicateStandoff(f32),
    /// Standoff distance must be > 0
    InvalidStandoff(f32),
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Actuator driver errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorError {
    /// GPIO pin operation failed
    PinError(ActuatorId),
    /// PWM duty cycle update failed
    PwmError(ActuatorId),
    /// Driver or provider could not be brought up
    Unavailable(heapless::String<64>),
    /// Command issued to an actuator that is not energized
    NotEnergized(ActuatorId),
}

/// Session state machine errors.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// Requested operation is not allowed from the current state
    InvalidTransition {
        /// State the session was in
        from: SessionState,
        /// Operation that was attempted
        action: &'static str,
    },
    /// Automated run requested but no drill was loaded
    NoDrillLoaded,
    /// Session could not be created because a collaborator is missing
    DriverUnavailable(&'static str),
    /// Exit speed must be a positive, finite number
    InvalidExitSpeed(f32),
    /// Drill has more shots than the session can hold
    TooManyShots,
}

/// Drill and goalie profile errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileError {
    /// Profile file does not exist
    Missing(heapless::String<128>),
    /// Profile row is short or unparsable
    Malformed {
        /// 1-based row number in the file (header is row 1)
        row: usize,
        /// Description of the problem
        reason: heapless::String<64>,
    },
    /// Drill has a header but no shots
    EmptyDrill,
    /// Name does not fit in the fixed-size name buffer
    NameTooLong,
    /// File I/O error
    Io(heapless::String<128>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Actuator(e) => write!(f, "Actuator error: {}", e),
            Error::Session(e) => write!(f, "Session error: {}", e),
            Error::Profile(e) => write!(f, "Profile error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::InvalidDegreesPerPulse(v) => {
                write!(f, "Invalid degrees per pulse: {}. Must be > 0", v)
            }
            ConfigError::InvalidFlywheelDiameter(v) => {
                write!(f, "Invalid flywheel diameter: {}. Must be > 0", v)
            }
            ConfigError::InvalidMaxRpm(v) => write!(f, "Invalid max RPM: {}. Must be > 0", v),
            ConfigError::ZeroDuration(field) => write!(f, "'{}' must be greater than 0", field),
            ConfigError::IncompleteOrder { list, missing } => {
                write!(f, "{} is missing actuator {}", list, missing)
            }
            ConfigError::DuplicateInOrder { list, actuator } => {
                write!(f, "{} lists actuator {} more than once", list, actuator)
            }
            ConfigError::IncompleteAimTable(name) => {
                write!(f, "Aim table '{}' does not cover all nine zones", name)
            }
            ConfigError::DuplicateStandoff(d) => {
                write!(f, "More than one aim table for standoff {} ft", d)
            }
            ConfigError::InvalidStandoff(d) => {
                write!(f, "Invalid standoff distance: {}. Must be > 0", d)
            }
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorError::PinError(id) => write!(f, "GPIO pin operation failed on {}", id),
            ActuatorError::PwmError(id) => write!(f, "PWM update failed on {}", id),
            ActuatorError::Unavailable(what) => write!(f, "Driver unavailable: {}", what),
            ActuatorError::NotEnergized(id) => write!(f, "{} is not energized", id),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::InvalidTransition { from, action } => {
                write!(f, "Cannot {} while session is {}", action, from)
            }
            SessionError::NoDrillLoaded => write!(f, "No drill loaded for automated run"),
            SessionError::DriverUnavailable(what) => {
                write!(f, "Cannot create session: {} not provided", what)
            }
            SessionError::InvalidExitSpeed(v) => {
                write!(f, "Invalid exit speed: {}. Must be a positive number", v)
            }
            SessionError::TooManyShots => write!(f, "Drill exceeds the maximum shot count"),
        }
    }
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Missing(path) => write!(f, "Profile not found: {}", path),
            ProfileError::Malformed { row, reason } => {
                write!(f, "Malformed profile row {}: {}", row, reason)
            }
            ProfileError::EmptyDrill => write!(f, "Drill profile has no shots"),
            ProfileError::NameTooLong => write!(f, "Profile name too long"),
            ProfileError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Error::Actuator(e)
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        Error::Session(e)
    }
}

impl From<ProfileError> for Error {
    fn from(e: ProfileError) -> Self {
        Error::Profile(e)
    }
}

/// Copy a message into a fixed-capacity string, truncating on a char boundary.
pub(crate) fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for ActuatorError {}

#[cfg(feature = "std")]
impl std::error::Error for SessionError {}

#[cfg(feature = "std")]
impl std::error::Error for ProfileError {}
