mod temp_file_arena_test;
