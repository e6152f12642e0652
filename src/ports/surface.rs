//! Surface port - A reusable display object owned by the ad network SDK.

use std::fmt;
use std::sync::Arc;

use super::{AdClickListener, AdDisplayListener};
use crate::domain::foundation::{AdHandle, SurfaceId, ZoneKey};

/// A long-lived display object bound to one zone.
///
/// Surfaces are created through the ad network and shared through the
/// surface registry by every adapter instance requesting the same zone.
/// Attachment changes are driven by the host UI; the bridge only observes
/// them through `is_attached` and the attach handler.
pub trait Surface: Send + Sync {
    /// Identity of this surface instance.
    fn id(&self) -> SurfaceId;

    /// Zone this surface was created for.
    fn zone(&self) -> &ZoneKey;

    /// Returns true while the surface is attached to a visible window.
    fn is_attached(&self) -> bool;

    /// Renders `ad` into the surface. Must be called on the UI context.
    fn render(&self, ad: &AdHandle);

    /// Routes display and click events of this surface to the given listeners.
    ///
    /// Replaces any previously installed listeners.
    fn set_listeners(&self, display: Arc<dyn AdDisplayListener>, click: Arc<dyn AdClickListener>);

    fn pause(&self) {}

    fn resume(&self) {}
}

impl fmt::Debug for dyn Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("id", &self.id())
            .field("zone", self.zone())
            .field("attached", &self.is_attached())
            .finish()
    }
}
