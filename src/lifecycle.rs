use crate::view::HeaderView;

/// Fatal capability error: the display surface cannot host a header view
/// outside its normal child hierarchy. Not recoverable.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlatformSupportError {
    #[error("display surface does not support header attachment")]
    AttachUnsupported,

    #[error("display surface does not support header detachment")]
    DetachUnsupported,
}

/// Scoped attachment of a header view to the render tree's lifecycle.
///
/// The pinned header is drawn outside normal layout, so the host surface has
/// to be told explicitly when a view starts and stops participating in its
/// lifecycle. A swapped-out view is always detached before its replacement
/// attaches, and teardown detaches whatever is still pinned.
pub trait ViewLifecycle {
    fn attach_header(&mut self, view: &mut dyn HeaderView) -> Result<(), PlatformSupportError>;

    fn detach_header(&mut self, view: &mut dyn HeaderView) -> Result<(), PlatformSupportError>;
}

/// Lifecycle for hosts with no attach semantics; both hooks are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectLifecycle;

impl ViewLifecycle for DirectLifecycle {
    fn attach_header(&mut self, _view: &mut dyn HeaderView) -> Result<(), PlatformSupportError> {
        Ok(())
    }

    fn detach_header(&mut self, _view: &mut dyn HeaderView) -> Result<(), PlatformSupportError> {
        Ok(())
    }
}
