#![no_main]
use libfuzzer_sys::fuzz_target;
use texdump::*;

fuzz_target!(|data: &[u8]| {
    // header: tag, width, height, stride slack, flags
    let [tag, w, h, slack, flags, rest @ ..] = data else {
        return;
    };
    let Ok(format) = PixelFormat::from_tag(u32::from(*tag)) else {
        return;
    };
    let (width, height) = (u32::from(*w % 64), u32::from(*h % 64));

    // Linear decode must never panic, whatever the buffer length
    let surface = LinearSurface::new(rest, format, width, height)
        .with_stride(width + u32::from(*slack % 8))
        .with_start_offset(usize::from(flags >> 4))
        .flipped(flags & 1 != 0);
    let _ = decode_linear(&surface, None, &enough::Unstoppable);

    // Structured decode through both layouts, including regions past the edge
    let info = TextureInfo::new(width, height, format);
    if let Ok(region) = Region::new(0, width + u32::from(flags & 2), height, 0) {
        let _ = decode_region(rest, &info, region, &TiledLayout, None, &enough::Unstoppable);
        let _ = decode_region(rest, &info, region, &LinearLayout, None, &enough::Unstoppable);
    }
});
