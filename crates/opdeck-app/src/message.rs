//! Messages driving the update loop
//!
//! Every input, timer tick, file-watch event, and async task completion is
//! a [`Message`]. The update loop is the only place state mutates, so the
//! variants here are a complete catalog of what can happen to the console.

use crate::input_key::InputKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // ========== Input ==========
    /// Raw key press, routed through the active modal or panel.
    Key(InputKey),
    /// Periodic tick; panels re-snapshot the parameter store on draw.
    Tick,
    /// Exit the console.
    Quit,

    // ========== Shell navigation ==========
    /// The settings shell became visible; reset to the first panel and row.
    Shown,
    NextPanel,
    PrevPanel,
    GotoPanel(usize),
    NextItem,
    PrevItem,
    /// Activate the selected row (toggle, button, or selector step).
    Activate,
    /// Step the selected selector down / up.
    SelectorDec,
    SelectorInc,
    /// Close the settings shell (outbound signal, host decides what's next).
    CloseRequested,

    // ========== Modals ==========
    ConfirmAccept,
    ConfirmCancel,
    AlertDismiss,

    // ========== Device state ==========
    /// Broadcast: the device entered (`true`) or left (`false`) the
    /// offroad state. Gates every offroad-only button.
    OffroadTransition(bool),
    /// A watched parameter file changed on disk.
    ParamFileChanged { key: String },

    // ========== Remote key fetch ==========
    /// Username submitted from the input modal.
    SshUsernameSubmitted { username: String },
    SshKeysFetched { username: String, keys: String },
    SshKeysEmpty { username: String },
    SshKeysFailed { username: String },
    SshKeysTimedOut,
}
