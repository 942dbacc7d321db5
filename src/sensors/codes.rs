//! Status code registry for the Sentry4 MIB enumerations.
//!
//! Every table is a closed enumeration. Looking up a code the MIB does not
//! define is an error, never a guessed severity.

use crate::error::{PduError, Result};
use crate::sensors::data::State;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Generic device/sensor status (`st4*Status`).
///
/// Codes 3 and 4 are not defined by the MIB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceStatus {
    Normal,
    Disabled,
    Purged,
    Reading,
    Settle,
    NotFound,
    Lost,
    ReadError,
    NoComm,
    PwrError,
    BreakerTripped,
    FuseBlown,
    LowAlarm,
    LowWarning,
    HighWarning,
    HighAlarm,
    Alarm,
    UnderLimit,
    OverLimit,
    NvmFail,
    ProfileError,
    Conflict,
}

impl DeviceStatus {
    pub fn from_code(code: i64) -> Result<Self> {
        use DeviceStatus::*;
        Ok(match code {
            0 => Normal,
            1 => Disabled,
            2 => Purged,
            5 => Reading,
            6 => Settle,
            7 => NotFound,
            8 => Lost,
            9 => ReadError,
            10 => NoComm,
            11 => PwrError,
            12 => BreakerTripped,
            13 => FuseBlown,
            14 => LowAlarm,
            15 => LowWarning,
            16 => HighWarning,
            17 => HighAlarm,
            18 => Alarm,
            19 => UnderLimit,
            20 => OverLimit,
            21 => NvmFail,
            22 => ProfileError,
            23 => Conflict,
            _ => return Err(PduError::unmapped_code("device status", code)),
        })
    }

    /// MIB name of the status.
    pub fn name(self) -> &'static str {
        use DeviceStatus::*;
        match self {
            Normal => "normal",
            Disabled => "disabled",
            Purged => "purged",
            Reading => "reading",
            Settle => "settle",
            NotFound => "notFound",
            Lost => "lost",
            ReadError => "readError",
            NoComm => "noComm",
            PwrError => "pwrError",
            BreakerTripped => "breakerTripped",
            FuseBlown => "fuseBlown",
            LowAlarm => "lowAlarm",
            LowWarning => "lowWarning",
            HighWarning => "highWarning",
            HighAlarm => "highAlarm",
            Alarm => "alarm",
            UnderLimit => "underLimit",
            OverLimit => "overLimit",
            NvmFail => "nvmFail",
            ProfileError => "profileError",
            Conflict => "conflict",
        }
    }

    pub fn severity(self) -> State {
        use DeviceStatus::*;
        match self {
            Normal | Disabled => State::Ok,
            Purged | Reading | Settle | NotFound | ReadError | LowWarning | HighWarning
            | NvmFail | ProfileError | Conflict => State::Warn,
            Lost | NoComm | PwrError | BreakerTripped | FuseBlown | LowAlarm | HighAlarm
            | Alarm | UnderLimit | OverLimit => State::Crit,
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Device on/off state (`st4*State`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceState {
    Unknown,
    On,
    Off,
}

impl DeviceState {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(DeviceState::Unknown),
            1 => Ok(DeviceState::On),
            2 => Ok(DeviceState::Off),
            _ => Err(PduError::unmapped_code("device state", code)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DeviceState::Unknown => "unknown",
            DeviceState::On => "on",
            DeviceState::Off => "off",
        }
    }

    pub fn severity(self) -> State {
        match self {
            DeviceState::Unknown => State::Warn,
            DeviceState::On | DeviceState::Off => State::Ok,
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a cord or outlet from its status and on/off state.
///
/// OK needs both to be healthy. An unknown on/off state degrades to WARN
/// even when the status alone would be critical.
pub fn power_state(status: DeviceStatus, state: DeviceState) -> State {
    if status.severity() == State::Ok && state.severity() == State::Ok {
        State::Ok
    } else if status.severity() == State::Warn || state == DeviceState::Unknown {
        State::Warn
    } else {
        State::Crit
    }
}

/// Unit classification (`st4UnitType`). Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    MasterPdu,
    LinkPdu,
    Controller,
    Emcu,
}

impl UnitType {
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(UnitType::MasterPdu),
            1 => Ok(UnitType::LinkPdu),
            2 => Ok(UnitType::Controller),
            3 => Ok(UnitType::Emcu),
            _ => Err(PduError::unmapped_code("unit type", code)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitType::MasterPdu => "masterPdu",
            UnitType::LinkPdu => "linkPdu",
            UnitType::Controller => "controller",
            UnitType::Emcu => "emcu",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
