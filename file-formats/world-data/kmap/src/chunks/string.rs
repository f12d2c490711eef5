//! Length-prefixed UTF-8 strings (`len:u16` followed by `len` bytes)

use binrw::{BinRead, BinResult};
use std::io::{Read, Seek, Write};

#[binrw::parser(reader, endian)]
pub(crate) fn parse_string() -> BinResult<String> {
    let len = u16::read_options(reader, endian, ())?;
    let pos = reader.stream_position()?;

    let mut bytes = vec![0u8; usize::from(len)];
    reader.read_exact(&mut bytes)?;

    String::from_utf8(bytes).map_err(|e| binrw::Error::AssertFail {
        pos,
        message: format!("invalid UTF-8 in string: {e}"),
    })
}

#[allow(clippy::ptr_arg)]
#[binrw::writer(writer, endian)]
pub(crate) fn write_string(value: &String) -> BinResult<()> {
    let Ok(len) = u16::try_from(value.len()) else {
        return Err(binrw::Error::AssertFail {
            pos: writer.stream_position()?,
            message: format!("string of {} bytes exceeds the u16 length prefix", value.len()),
        });
    };

    binrw::BinWrite::write_options(&len, writer, endian, ())?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}
