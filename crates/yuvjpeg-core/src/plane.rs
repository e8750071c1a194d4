//! Plane model for planar YUV 4:2:0 frames.
//!
//! A frame is three independently strided byte planes. Sample `(row, col)` of a
//! plane lives at `row * row_stride + col * pixel_stride`; all index math on
//! these caller-supplied strides is checked, so a hostile stride can never wrap
//! around into a valid-looking offset.

use crate::ConversionError;

/// Width and height of a 4:2:0 frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDescriptor {
    width: u32,
    height: u32,
}

impl ImageDescriptor {
    /// Create a descriptor, rejecting zero or odd dimensions.
    ///
    /// Chroma planes are half resolution in both directions, so both dimensions
    /// must be even for every chroma cell to cover a full 2x2 block.
    pub fn new(width: u32, height: u32) -> Result<Self, ConversionError> {
        if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
            return Err(ConversionError::InvalidSize {
                width: width.into(),
                height: height.into(),
            });
        }
        Ok(Self { width, height })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width of each chroma plane in samples.
    pub fn chroma_width(&self) -> u32 {
        self.width / 2
    }

    /// Height of each chroma plane in samples.
    pub fn chroma_height(&self) -> u32 {
        self.height / 2
    }

    /// Number of luma samples (`width * height`).
    pub fn luma_len(&self) -> Result<usize, ConversionError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(self.size_error())
    }

    /// Number of chroma cells (`(width / 2) * (height / 2)`).
    pub fn chroma_len(&self) -> Result<usize, ConversionError> {
        (self.chroma_width() as usize)
            .checked_mul(self.chroma_height() as usize)
            .ok_or(self.size_error())
    }

    /// Exact byte length of the NV21 packing of this frame.
    pub fn nv21_len(&self) -> Result<usize, ConversionError> {
        self.chroma_len()?
            .checked_mul(2)
            .and_then(|chroma| chroma.checked_add(self.luma_len().ok()?))
            .ok_or(self.size_error())
    }

    /// Exact byte length of the RGB24 expansion of this frame.
    pub fn rgb24_len(&self) -> Result<usize, ConversionError> {
        self.luma_len()?.checked_mul(3).ok_or(self.size_error())
    }

    fn size_error(&self) -> ConversionError {
        ConversionError::InvalidSize {
            width: self.width.into(),
            height: self.height.into(),
        }
    }
}

/// One sample plane: borrowed bytes plus row and pixel stride.
#[derive(Debug, Clone, Copy)]
pub struct PlaneBuffer<'a> {
    data: &'a [u8],
    row_stride: u32,
    pixel_stride: u32,
}

impl<'a> PlaneBuffer<'a> {
    /// Create a plane view. Both strides must be at least 1.
    pub fn new(
        data: &'a [u8],
        row_stride: u32,
        pixel_stride: u32,
    ) -> Result<Self, ConversionError> {
        if row_stride == 0 {
            return Err(ConversionError::InvalidArgument(
                "row stride must be at least 1".to_string(),
            ));
        }
        if pixel_stride == 0 {
            return Err(ConversionError::InvalidArgument(
                "pixel stride must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            data,
            row_stride,
            pixel_stride,
        })
    }

    /// Create a tightly packed plane (`pixel_stride == 1`).
    pub fn packed(data: &'a [u8], row_stride: u32) -> Result<Self, ConversionError> {
        Self::new(data, row_stride, 1)
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn row_stride(&self) -> u32 {
        self.row_stride
    }

    pub fn pixel_stride(&self) -> u32 {
        self.pixel_stride
    }

    /// Byte offset of sample `(row, col)`, or `None` if it overflows `usize`.
    #[inline]
    pub fn offset(&self, row: u32, col: u32) -> Option<usize> {
        (row as usize)
            .checked_mul(self.row_stride as usize)?
            .checked_add((col as usize).checked_mul(self.pixel_stride as usize)?)
    }

    /// Sample at `(row, col)`, or `None` when it lies outside the data.
    #[inline]
    pub fn sample(&self, row: u32, col: u32) -> Option<u8> {
        self.offset(row, col).and_then(|i| self.data.get(i).copied())
    }

    /// Sample at `(row, col)`, or `fallback` when it lies outside the data.
    #[inline]
    pub fn sample_or(&self, row: u32, col: u32, fallback: u8) -> (u8, bool) {
        match self.sample(row, col) {
            Some(v) => (v, false),
            None => (fallback, true),
        }
    }

    /// The contiguous bytes backing row `row`, truncated to what the data holds.
    ///
    /// Only meaningful for `pixel_stride == 1`. Returns an empty slice when the
    /// row starts past the end of the data.
    pub fn row_prefix(&self, row: u32, len: u32) -> &'a [u8] {
        let Some(start) = self.offset(row, 0) else {
            return &[];
        };
        if start >= self.data.len() {
            return &[];
        }
        let end = start.saturating_add(len as usize).min(self.data.len());
        &self.data[start..end]
    }

    /// Minimum data length for `rows x cols` samples to be addressable.
    ///
    /// The last row only needs to reach its last sample, not a full stride,
    /// which matches camera buffers that omit trailing row padding.
    pub fn required_len(&self, rows: u32, cols: u32) -> Option<usize> {
        if rows == 0 || cols == 0 {
            return Some(0);
        }
        self.offset(rows - 1, cols - 1)?.checked_add(1)
    }
}

/// A planar YUV 4:2:0 frame: descriptor plus Y, U and V planes.
#[derive(Debug, Clone, Copy)]
pub struct Yuv420Frame<'a> {
    pub descriptor: ImageDescriptor,
    pub y: PlaneBuffer<'a>,
    pub u: PlaneBuffer<'a>,
    pub v: PlaneBuffer<'a>,
}

impl<'a> Yuv420Frame<'a> {
    pub fn new(
        descriptor: ImageDescriptor,
        y: PlaneBuffer<'a>,
        u: PlaneBuffer<'a>,
        v: PlaneBuffer<'a>,
    ) -> Self {
        Self {
            descriptor,
            y,
            u,
            v,
        }
    }

    pub fn width(&self) -> u32 {
        self.descriptor.width()
    }

    pub fn height(&self) -> u32 {
        self.descriptor.height()
    }

    /// Verify every plane can address all of its logical samples.
    ///
    /// This is the up-front check of the strict bounds policy: once it passes,
    /// no sample read during packing can fall outside its plane.
    pub fn check_capacity(&self) -> Result<(), ConversionError> {
        let d = &self.descriptor;
        check_plane("Y", &self.y, d.height(), d.width(), d)?;
        check_plane("U", &self.u, d.chroma_height(), d.chroma_width(), d)?;
        check_plane("V", &self.v, d.chroma_height(), d.chroma_width(), d)?;
        Ok(())
    }
}

fn check_plane(
    name: &'static str,
    plane: &PlaneBuffer<'_>,
    rows: u32,
    cols: u32,
    descriptor: &ImageDescriptor,
) -> Result<(), ConversionError> {
    let required = plane
        .required_len(rows, cols)
        .ok_or(ConversionError::InvalidSize {
            width: descriptor.width().into(),
            height: descriptor.height().into(),
        })?;
    if plane.data().len() < required {
        return Err(ConversionError::InvalidPlaneSize {
            plane: name,
            required,
            actual: plane.data().len(),
        });
    }
    Ok(())
}
