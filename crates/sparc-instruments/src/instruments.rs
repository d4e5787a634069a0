pub mod olbi;
