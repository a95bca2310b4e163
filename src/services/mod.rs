pub mod booking;
pub mod directory;

pub use booking::Removed;
pub use directory::{
    Area, ArtistDetail, ArtistShow, DirectoryEntry, SearchResults, ShowListing, VenueDetail,
    VenueShow,
};
