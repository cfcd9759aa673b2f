mod storage;

pub use storage::StorageMessage;
