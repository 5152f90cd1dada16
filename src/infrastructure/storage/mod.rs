mod temp_file_arena;

pub use temp_file_arena::TempFileArena;
