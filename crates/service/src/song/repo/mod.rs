pub mod seaorm;

pub use seaorm::SeaOrmSongRepository;
