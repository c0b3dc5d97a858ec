pub mod bg;
pub mod config;
pub mod error;
pub mod io;
pub mod matching;
pub mod multicolor;
pub mod phylo;
pub mod scaffold;
