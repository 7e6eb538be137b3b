mod db;
pub use db::DatabaseHandler;

mod statistics;
