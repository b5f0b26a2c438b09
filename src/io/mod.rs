mod range_reader;
mod seek_reader;

pub use range_reader::RangeReader;
pub use seek_reader::SeekReader;
