//! Job-lifecycle triggers and their message styles.
//!
//! The trigger → style mapping is a fixed table. All triggers currently share
//! one template and differ only in attachment color.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

/// Name of the bundled message template.
pub const MESSAGE_TEMPLATE: &str = "mattermost-incoming-message.json";

/// Recognized job-lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Start,
    Success,
    Failure,
}

/// Attachment color, expressed with the chat platform's named colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageColor {
    Yellow,
    Green,
    Red,
}

impl MessageColor {
    /// Color code understood by Slack-compatible incoming webhooks.
    pub fn code(&self) -> &'static str {
        match self {
            MessageColor::Yellow => "warning",
            MessageColor::Green => "good",
            MessageColor::Red => "danger",
        }
    }
}

impl fmt::Display for MessageColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Template identifier and color used to render one trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerStyle {
    pub template: &'static str,
    pub color: MessageColor,
}

static TRIGGER_STYLES: [(Trigger, TriggerStyle); 3] = [
    (
        Trigger::Start,
        TriggerStyle {
            template: MESSAGE_TEMPLATE,
            color: MessageColor::Yellow,
        },
    ),
    (
        Trigger::Success,
        TriggerStyle {
            template: MESSAGE_TEMPLATE,
            color: MessageColor::Green,
        },
    ),
    (
        Trigger::Failure,
        TriggerStyle {
            template: MESSAGE_TEMPLATE,
            color: MessageColor::Red,
        },
    ),
];

impl Trigger {
    /// All recognized triggers.
    pub const ALL: [Trigger; 3] = [Trigger::Start, Trigger::Success, Trigger::Failure];

    /// The trigger name as sent by the orchestration host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Start => "start",
            Trigger::Success => "success",
            Trigger::Failure => "failure",
        }
    }

    /// Look up the message style for this trigger.
    pub fn style(&self) -> &'static TriggerStyle {
        let index = match self {
            Trigger::Start => 0,
            Trigger::Success => 1,
            Trigger::Failure => 2,
        };
        &TRIGGER_STYLES[index].1
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trigger {
    type Err = NotifyError;

    /// Trigger names are matched exactly; `"Start"` is not a trigger.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Trigger::Start),
            "success" => Ok(Trigger::Success),
            "failure" => Ok(Trigger::Failure),
            other => Err(NotifyError::unknown_trigger(other)),
        }
    }
}
