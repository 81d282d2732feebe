//! Command names and argument formatting for the control protocol.

use std::fmt::Display;

pub const GET_PROFILES: &str = "getprofiles";
pub const GET_PROFILE: &str = "getprofile";
pub const GET_STATUS: &str = "getstatus";
pub const GET_COUNT_LEDS: &str = "getcountleds";
pub const GET_API_STATUS: &str = "getstatusapi";
pub const API_KEY: &str = "apikey";
pub const SET_COLOR: &str = "setcolor";
pub const SET_GAMMA: &str = "setgamma";
pub const SET_SMOOTH: &str = "setsmooth";
pub const SET_BRIGHTNESS: &str = "setbrightness";
pub const SET_PROFILE: &str = "setprofile";
pub const SET_STATUS: &str = "setstatus";
pub const LOCK: &str = "lock";
pub const UNLOCK: &str = "unlock";

pub const STATUS_ON: &str = "on";
pub const STATUS_OFF: &str = "off";

/// `<name>:<value>`
pub fn with_arg(name: &str, value: impl Display) -> String {
    format!("{name}:{value}")
}

/// One LED definition inside `setcolor`: `<index>-<r>,<g>,<b>`.
///
/// `index` is the one-based protocol index.
pub fn color_def(index: usize, (r, g, b): (u8, u8, u8)) -> String {
    format!("{index}-{r},{g},{b}")
}

/// `setcolor:<def>[;<def>...]`
pub fn set_color<S: AsRef<str>>(defs: &[S]) -> String {
    let joined = defs
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(";");
    with_arg(SET_COLOR, joined)
}

/// Render a command for logs with credentials masked.
pub fn redacted(command: &str) -> std::borrow::Cow<'_, str> {
    match command.split_once(':') {
        Some((API_KEY, _)) => format!("{API_KEY}:<redacted>").into(),
        _ => command.into(),
    }
}
