pub mod seq_db_factory;

pub use seq_db_factory::SeqDbFactory;
