// Adapters layer: concrete implementations of the domain ports.

pub mod qrcode_encoder;
pub mod svg;

pub use qrcode_encoder::QrCodeEncoder;
pub use svg::SvgSurface;
