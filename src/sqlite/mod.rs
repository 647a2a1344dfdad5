//! `SQLite` team-member store. Enable the `sqlx_sqlite` feature to use it.

pub mod migrations;
mod team_member;

pub use team_member::SqliteTeamMemberRepository;
