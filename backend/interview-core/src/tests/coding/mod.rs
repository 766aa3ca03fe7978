mod judge;
mod problems;
mod workbench;
