//! User-facing text table.
//!
//! Everything an end user ever reads — sign labels and ride notifications —
//! comes from here, so hosts can localize by swapping a single struct.
//! Defaults are English.  Loading these from a file is the embedding
//! application's concern.

/// Texts shown on signs and sent to riders.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Messages {
    /// Label of the sign line showing the floor the sign is on.
    pub current_floor: String,
    /// Label of the sign line showing the selected destination floor.
    pub destination: String,
    /// Sent when a structure has a single floor and cannot ride anywhere.
    pub one_floor: String,
    /// Sent when a selected destination level does not exist.
    pub floor_not_exists: String,
    /// Sent when no base block was found below a button.
    pub no_base_block: String,
    /// Sent to stragglers force-teleported to the destination on timeout.
    pub timeout: String,
    /// Sent to entities pushed back from an active shaft.
    pub cant_enter: String,
    /// Sent to occupants re-centered by the prevent-leave policy.
    pub cant_leave: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            current_floor:    "Current floor".to_string(),
            destination:      "Destination".to_string(),
            one_floor:        "This elevator has only one floor".to_string(),
            floor_not_exists: "This floor does not exist".to_string(),
            no_base_block:    "There is no base block below this button".to_string(),
            timeout:          "The elevator timed out and moved you to your destination".to_string(),
            cant_enter:       "You can't enter an elevator in motion".to_string(),
            cant_leave:       "You can't leave an elevator in motion".to_string(),
        }
    }
}
