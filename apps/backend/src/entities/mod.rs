pub mod divisions;
pub mod events;
pub mod match_hands;
pub mod matches;
pub mod player_contacts;
pub mod players;
pub mod scoreboards;
pub mod seasons;
pub mod standings;
pub mod teams;
pub mod user_credentials;
pub mod users;

pub use divisions::Entity as Divisions;
pub use events::Entity as Events;
pub use match_hands::Entity as MatchHands;
pub use matches::Entity as Matches;
pub use player_contacts::Entity as PlayerContacts;
pub use players::Entity as Players;
pub use scoreboards::Entity as Scoreboards;
pub use seasons::Entity as Seasons;
pub use standings::Entity as Standings;
pub use teams::Entity as Teams;
pub use user_credentials::Entity as UserCredentials;
pub use users::Entity as Users;
