//! Identifier strategy, index-keyed weight containers and the shared error taxonomy that
//! the rest of `ixgraph` is built on.

pub mod error;
pub mod id;
pub mod weights;

pub use error::{
    DuplicateId, GraphMutationError, IllegalInput, NoFeasibleFlow, NoSuchId, UnsupportedOperation,
};
pub use id::{
    DefaultIdStrategy, GraphId, IdGenerator, IdStrategy, IndexId, ListenerHandle,
    MappedIdStrategy, SwapEvent,
};
pub use weights::{
    BoolWeights, ByteWeights, CharWeights, DoubleWeights, FloatWeights, IndexWeights,
    IntWeights, LongWeights, ObjWeights, ShortWeights,
};
