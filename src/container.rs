use std::io::{self, Cursor, Error, ErrorKind, Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use image::{ImageFormat, RgbaImage};

/// The length of an ICONDIR header, in bytes:
const ICON_DIR_HEADER_LENGTH: u32 = 6;

/// The length of one ICONDIRENTRY record, in bytes:
const ICON_DIR_ENTRY_LENGTH: u32 = 16;

/// Image type marker for icon resources (cursors use 2):
const IMAGE_TYPE_ICON: u16 = 1;

/// A set of icon images stored in a single ICO file.
pub struct IconDir {
    /// The directory entries stored in the ICO file, in file order.
    pub entries: Vec<IconDirEntry>,
}

/// One directory entry in an ICO file, referencing a PNG-encoded payload.
pub struct IconDirEntry {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl IconDirEntry {
    /// Creates an entry with the given dimensions and PNG payload.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> IconDirEntry {
        IconDirEntry {
            width,
            height,
            data,
        }
    }

    /// Returns the width of the entry's image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the entry's image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the entry's encoded payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Decodes the entry's payload into an image.  Returns an error if the
    /// payload is malformed or its dimensions disagree with the directory
    /// entry.
    pub fn decode_image(&self) -> io::Result<RgbaImage> {
        let image = image::load_from_memory_with_format(&self.data, ImageFormat::Png)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err))?
            .into_rgba8();
        if image.width() != self.width || image.height() != self.height {
            let msg = format!(
                "decoded PNG has wrong dimensions ({}x{} instead of {}x{})",
                image.width(),
                image.height(),
                self.width,
                self.height
            );
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        Ok(image)
    }
}

impl IconDir {
    /// Creates a new, empty icon directory.
    pub fn new() -> IconDir {
        IconDir {
            entries: Vec::new(),
        }
    }

    /// Returns true if the directory contains no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// PNG-encodes the image and appends it as a new entry.
    pub fn add_png_image(&mut self, image: &RgbaImage) -> io::Result<()> {
        let mut data = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut data), ImageFormat::Png)
            .map_err(|err| Error::new(ErrorKind::InvalidData, err))?;
        self.entries
            .push(IconDirEntry::new(image.width(), image.height(), data));
        Ok(())
    }

    /// Reads an icon directory from an ICO file.
    pub fn read<R: Read + Seek>(mut reader: R) -> io::Result<IconDir> {
        let reserved = reader.read_u16::<LittleEndian>()?;
        if reserved != 0 {
            let msg = "not an ICO file (reserved field must be zero)";
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let image_type = reader.read_u16::<LittleEndian>()?;
        if image_type != IMAGE_TYPE_ICON {
            let msg = format!("unsupported image type ({})", image_type);
            return Err(Error::new(ErrorKind::InvalidData, msg));
        }
        let num_entries = reader.read_u16::<LittleEndian>()? as usize;
        let mut spans = Vec::<(u32, u32, u32, u32)>::with_capacity(num_entries);
        for _ in 0..num_entries {
            let width = decode_dimension(reader.read_u8()?);
            let height = decode_dimension(reader.read_u8()?);
            let _color_count = reader.read_u8()?;
            let _reserved = reader.read_u8()?;
            let _color_planes = reader.read_u16::<LittleEndian>()?;
            let _bits_per_pixel = reader.read_u16::<LittleEndian>()?;
            let data_length = reader.read_u32::<LittleEndian>()?;
            let data_offset = reader.read_u32::<LittleEndian>()?;
            spans.push((width, height, data_offset, data_length));
        }
        let mut dir = IconDir::new();
        for &(width, height, data_offset, data_length) in &spans {
            reader.seek(SeekFrom::Start(u64::from(data_offset)))?;
            let mut data = vec![0u8; data_length as usize];
            reader.read_exact(&mut data)?;
            dir.entries.push(IconDirEntry::new(width, height, data));
        }
        Ok(dir)
    }

    /// Writes the icon directory to an ICO file.
    pub fn write<W: Write>(&self, mut writer: W) -> io::Result<()> {
        if self.entries.len() > usize::from(u16::MAX) {
            let msg = format!("too many entries ({})", self.entries.len());
            return Err(Error::new(ErrorKind::InvalidInput, msg));
        }
        writer.write_u16::<LittleEndian>(0)?; // reserved
        writer.write_u16::<LittleEndian>(IMAGE_TYPE_ICON)?;
        writer.write_u16::<LittleEndian>(self.entries.len() as u16)?;
        let mut data_offset =
            ICON_DIR_HEADER_LENGTH + ICON_DIR_ENTRY_LENGTH * self.entries.len() as u32;
        for entry in &self.entries {
            writer.write_u8(encode_dimension(entry.width))?;
            writer.write_u8(encode_dimension(entry.height))?;
            writer.write_u8(0)?; // color count (not paletted)
            writer.write_u8(0)?; // reserved
            writer.write_u16::<LittleEndian>(1)?; // color planes
            writer.write_u16::<LittleEndian>(32)?; // bits per pixel
            writer.write_u32::<LittleEndian>(entry.data.len() as u32)?;
            writer.write_u32::<LittleEndian>(data_offset)?;
            data_offset += entry.data.len() as u32;
        }
        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }
        Ok(())
    }

    /// Returns the encoded length of the file, in bytes, including the
    /// header and directory.
    pub fn total_length(&self) -> u32 {
        let mut length =
            ICON_DIR_HEADER_LENGTH + ICON_DIR_ENTRY_LENGTH * self.entries.len() as u32;
        for entry in &self.entries {
            length += entry.data.len() as u32;
        }
        length
    }
}

impl Default for IconDir {
    fn default() -> IconDir {
        IconDir::new()
    }
}

/// Directory entries store 256 as a zero byte.
fn encode_dimension(size: u32) -> u8 {
    if size >= 256 {
        0
    } else {
        size as u8
    }
}

fn decode_dimension(byte: u8) -> u32 {
    if byte == 0 {
        256
    } else {
        u32::from(byte)
    }
}
