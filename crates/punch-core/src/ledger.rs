//! Attendance ledger: append-only clock events and entrance/exit pairing.
//!
//! # Pairing
//!
//! Each entrance opens an attendance record for its (employee, date) slot. An exit
//! closes the earliest-recorded entrance that is still open for the same employee and
//! date. Order is insertion order, not time of day. Closed records are never
//! re-targeted, and an exit without an open entrance is rejected instead of stored.
//!
//! Open entrances are indexed per (employee, date) as a FIFO queue of event
//! positions, so matching an exit never scans the event history.
//!
//! # Thread Safety
//!
//! [`Ledger`] is `Send` and mutating operations take `&mut self`. Sharing a ledger
//! between sessions requires a lock held across the whole `record_exit` call, since
//! finding the open entrance and appending the exit must happen together.

use std::collections::{HashMap, VecDeque};

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::AttendanceError;
use crate::registry::EmployeeDirectory;
use crate::types::{ClockKind, EmployeeId, EntrancePolicy, EventId};

/// A resolved calendar date and minute-granularity time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClockStamp {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl ClockStamp {
    /// Creates a stamp, dropping seconds and sub-seconds from `time`.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time: truncate_to_minute(time),
        }
    }

    /// Stamp for a point in local wall-clock time.
    pub fn at(datetime: NaiveDateTime) -> Self {
        Self::new(datetime.date(), datetime.time())
    }

    /// Stamp for the current local wall-clock time.
    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

/// A single clock-in or clock-out. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockEvent {
    pub id: EventId,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub kind: ClockKind,
    /// For exits, the entrance this event closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closes: Option<EventId>,
}

/// An entrance together with the exit that closed it, if any.
///
/// Records are derived from the event history on every query and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceRecord {
    pub entrance_event: EventId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_event: Option<EventId>,
    pub employee_id: EmployeeId,
    pub date: NaiveDate,
    pub entrance: NaiveTime,
    pub exit: Option<NaiveTime>,
}

impl AttendanceRecord {
    /// True while no exit has been recorded for this entrance.
    pub const fn is_open(&self) -> bool {
        self.exit.is_none()
    }
}

type Slot = (EmployeeId, NaiveDate);

/// Append-only store of clock events for one process.
#[derive(Debug)]
pub struct Ledger {
    policy: EntrancePolicy,
    next_id: EventId,
    events: Vec<ClockEvent>,
    /// Entrance ID -> position of the exit that closed it.
    closed_by: HashMap<EventId, usize>,
    /// Positions of still-open entrances, oldest first.
    open: HashMap<Slot, VecDeque<usize>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            policy: EntrancePolicy::default(),
            next_id: EventId::FIRST,
            events: Vec::new(),
            closed_by: HashMap::new(),
            open: HashMap::new(),
        }
    }
}

impl Ledger {
    /// Creates an empty ledger with the permissive entrance policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ledger with the given entrance policy.
    pub fn with_policy(policy: EntrancePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub const fn policy(&self) -> EntrancePolicy {
        self.policy
    }

    /// Records an entrance for a registered employee.
    ///
    /// Under [`EntrancePolicy::Permissive`] an entrance always opens a new record,
    /// even if the employee already has open records that day.
    pub fn record_entrance<D: EmployeeDirectory + ?Sized>(
        &mut self,
        directory: &D,
        employee_id: &EmployeeId,
        stamp: ClockStamp,
    ) -> Result<ClockEvent, AttendanceError> {
        if !directory.exists(employee_id) {
            return Err(AttendanceError::UnknownEmployee {
                id: employee_id.clone(),
            });
        }

        let slot = (employee_id.clone(), stamp.date);
        if self.policy == EntrancePolicy::Strict
            && self.open.get(&slot).is_some_and(|queue| !queue.is_empty())
        {
            return Err(AttendanceError::EntranceAlreadyOpen {
                id: employee_id.clone(),
                date: stamp.date,
            });
        }

        let position = self.append(employee_id, stamp, ClockKind::Entrance, None);
        self.open.entry(slot).or_default().push_back(position);
        Ok(self.events[position].clone())
    }

    /// Records an exit, closing the earliest open entrance for that employee and date.
    ///
    /// Checks run in order: empty ledger, unknown employee, missing open entrance.
    /// On failure nothing is recorded.
    pub fn record_exit<D: EmployeeDirectory + ?Sized>(
        &mut self,
        directory: &D,
        employee_id: &EmployeeId,
        stamp: ClockStamp,
    ) -> Result<ClockEvent, AttendanceError> {
        if self.events.is_empty() {
            return Err(AttendanceError::EmptyLedger);
        }
        if !directory.exists(employee_id) {
            return Err(AttendanceError::UnknownEmployee {
                id: employee_id.clone(),
            });
        }

        let slot = (employee_id.clone(), stamp.date);
        let Some(queue) = self.open.get_mut(&slot) else {
            return Err(AttendanceError::NoOpenEntrance {
                id: employee_id.clone(),
                date: stamp.date,
            });
        };
        let Some(entrance_position) = queue.pop_front() else {
            return Err(AttendanceError::NoOpenEntrance {
                id: employee_id.clone(),
                date: stamp.date,
            });
        };
        if queue.is_empty() {
            self.open.remove(&slot);
        }

        let entrance_id = self.events[entrance_position].id;
        let position = self.append(employee_id, stamp, ClockKind::Exit, Some(entrance_id));
        self.closed_by.insert(entrance_id, position);
        Ok(self.events[position].clone())
    }

    /// All attendance records of one employee, in insertion order.
    pub fn events_for(&self, employee_id: &EmployeeId) -> Vec<AttendanceRecord> {
        self.entrances()
            .filter(|event| &event.employee_id == employee_id)
            .map(|event| self.record_from(event))
            .collect()
    }

    /// Every attendance record, in insertion order.
    pub fn all_records(&self) -> Vec<AttendanceRecord> {
        self.entrances().map(|event| self.record_from(event)).collect()
    }

    /// Records of one employee that still lack an exit.
    pub fn open_records(&self, employee_id: &EmployeeId) -> Vec<AttendanceRecord> {
        self.events_for(employee_id)
            .into_iter()
            .filter(AttendanceRecord::is_open)
            .collect()
    }

    /// Looks up the record opened by the given entrance event.
    pub fn record(&self, entrance: EventId) -> Option<AttendanceRecord> {
        self.entrances()
            .find(|event| event.id == entrance)
            .map(|event| self.record_from(event))
    }

    /// Raw clock events, in insertion order.
    pub fn events(&self) -> &[ClockEvent] {
        &self.events
    }

    /// Number of attendance records (one per entrance).
    pub fn record_count(&self) -> usize {
        self.entrances().count()
    }

    /// Number of clock events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn append(
        &mut self,
        employee_id: &EmployeeId,
        stamp: ClockStamp,
        kind: ClockKind,
        closes: Option<EventId>,
    ) -> usize {
        let id = self.next_id;
        self.next_id = id.next();
        self.events.push(ClockEvent {
            id,
            employee_id: employee_id.clone(),
            date: stamp.date,
            time: stamp.time,
            kind,
            closes,
        });
        self.events.len() - 1
    }

    fn entrances(&self) -> impl Iterator<Item = &ClockEvent> {
        self.events
            .iter()
            .filter(|event| event.kind == ClockKind::Entrance)
    }

    fn record_from(&self, entrance: &ClockEvent) -> AttendanceRecord {
        let exit = self
            .closed_by
            .get(&entrance.id)
            .map(|&position| &self.events[position]);
        AttendanceRecord {
            entrance_event: entrance.id,
            exit_event: exit.map(|event| event.id),
            employee_id: entrance.employee_id.clone(),
            date: entrance.date,
            entrance: entrance.time,
            exit: exit.map(|event| event.time),
        }
    }
}
