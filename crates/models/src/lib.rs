pub mod db;
pub mod results;
