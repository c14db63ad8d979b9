// Use cases that sit between the web/CLI surfaces and the directory client

pub mod presentation;

pub use presentation::PresentationService;
