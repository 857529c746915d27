pub mod cik;
