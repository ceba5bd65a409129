/// Host-facing context (device/queue + color target format).
///
/// This is intentionally small and stable. The crate never creates these; the
/// host's GPU runtime hands them in.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    /// Format of the color target the assembled pipeline renders into.
    pub color_format: wgpu::TextureFormat,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(
        device: &'a wgpu::Device,
        queue: &'a wgpu::Queue,
        color_format: wgpu::TextureFormat,
    ) -> Self {
        Self {
            device,
            queue,
            color_format,
        }
    }
}
