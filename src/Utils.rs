//! different utility modules used throughout the project
/// logger setup and saving of solver traces into csv and text files
pub mod logger;
/// pretty-printed tables of solver traces
pub mod tables;
/// typed tasks and settings read from a task document
pub mod task;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
/// runs tasks, prints and exports their results
pub mod task_runner;
