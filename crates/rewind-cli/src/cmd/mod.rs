pub mod demo;
pub mod reduce;
pub mod run;
