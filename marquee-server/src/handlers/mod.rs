pub mod films;
pub mod genres;
pub mod params;
pub mod persons;
