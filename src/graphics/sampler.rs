#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    Point,
    Linear,
}

/// How to deal with out of bounds accesses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Wrap,
    Clamp,
}

/// Backend independent sampler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerDesc {
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub mip_filter: FilterMode,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self::new()
    }
}

impl SamplerDesc {
    /// Point filtered, wrapping on every axis.
    pub const fn new() -> Self {
        Self {
            min_filter: FilterMode::Point,
            mag_filter: FilterMode::Point,
            mip_filter: FilterMode::Point,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            address_w: AddressMode::Wrap,
        }
    }

    /// Bilinear min/mag, point mip, clamped on all axes.
    pub const fn blur() -> Self {
        Self::new()
            .with_filter_mode(FilterMode::Linear, FilterMode::Linear, FilterMode::Point)
            .clamp()
    }

    pub const fn with_filter_mode(
        mut self,
        min: FilterMode,
        mag: FilterMode,
        mip: FilterMode,
    ) -> Self {
        self.min_filter = min;
        self.mag_filter = mag;
        self.mip_filter = mip;
        self
    }

    pub const fn with_addressing_mode(
        mut self,
        u: AddressMode,
        v: AddressMode,
        w: AddressMode,
    ) -> Self {
        self.address_u = u;
        self.address_v = v;
        self.address_w = w;
        self
    }

    /// uvw are all affected
    pub const fn clamp(self) -> Self {
        self.with_addressing_mode(AddressMode::Clamp, AddressMode::Clamp, AddressMode::Clamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blur_sampler_is_bilinear_and_clamped() {
        let desc = SamplerDesc::blur();
        assert_eq!(
            (desc.min_filter, desc.mag_filter, desc.mip_filter),
            (FilterMode::Linear, FilterMode::Linear, FilterMode::Point)
        );
        assert_eq!(
            (desc.address_u, desc.address_v, desc.address_w),
            (AddressMode::Clamp, AddressMode::Clamp, AddressMode::Clamp)
        );
        assert_eq!(SamplerDesc::default().address_u, AddressMode::Wrap);
    }
}
