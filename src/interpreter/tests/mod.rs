mod attributes;
mod cursor;
mod erase;
