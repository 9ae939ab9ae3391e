//! Stable handles into the descriptor arena.

macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $name(u32);

            impl $name {
                pub(crate) fn new(index: usize) -> Self {
                    Self(index as u32)
                }

                /// Position in the pool's arena for this node kind.
                pub fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )*
    };
}

define_id! {
    /// Handle to a file.
    FileId;
    /// Handle to a message.
    MessageId;
    /// Handle to a field or extension.
    FieldId;
    /// Handle to a oneof.
    OneofId;
    /// Handle to an enum.
    EnumId;
    /// Handle to an enum value.
    EnumValueId;
    /// Handle to a service.
    ServiceId;
    /// Handle to an RPC method.
    MethodId;
}
