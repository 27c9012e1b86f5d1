pub mod nav;
pub mod species_card;
pub mod toast;
