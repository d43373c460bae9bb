pub mod index_spec;
pub mod transaction_store;

// implementation modules
pub mod mem_store;
pub mod mongo_store;
