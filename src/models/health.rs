use serde::Serialize;

/// Shared `{"ok": true}` body used by the health check and by endpoints that
/// only report success.
#[derive(Serialize, Debug, Clone, Copy)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
