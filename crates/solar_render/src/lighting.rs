//! Lighting switches for the lit pipeline

use bitflags::bitflags;

bitflags! {
    /// Which lighting terms the lit pipeline applies
    ///
    /// The bits are uploaded unchanged in
    /// [`FrameUniforms::lighting_flags`](crate::pipeline::FrameUniforms), so
    /// their values must match the constants in `lit.wgsl`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LightingFlags: u32 {
        /// Constant fill light
        const AMBIENT = 1 << 0;
        /// Lambertian term from the light position
        const DIFFUSE = 1 << 1;
        /// Phong highlight
        const SPECULAR = 1 << 2;
    }
}

impl Default for LightingFlags {
    fn default() -> Self {
        Self::all()
    }
}

impl LightingFlags {
    /// Short label for the window title, e.g. `"A D -"`
    pub fn label(&self) -> String {
        [
            (Self::AMBIENT, "A"),
            (Self::DIFFUSE, "D"),
            (Self::SPECULAR, "S"),
        ]
        .iter()
        .map(|(flag, name)| if self.contains(*flag) { *name } else { "-" })
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let flags = LightingFlags::default();
        assert!(flags.contains(LightingFlags::AMBIENT));
        assert!(flags.contains(LightingFlags::DIFFUSE));
        assert!(flags.contains(LightingFlags::SPECULAR));
    }

    #[test]
    fn test_toggle_is_independent() {
        let mut flags = LightingFlags::default();
        flags.toggle(LightingFlags::DIFFUSE);
        assert!(!flags.contains(LightingFlags::DIFFUSE));
        assert!(flags.contains(LightingFlags::AMBIENT | LightingFlags::SPECULAR));

        flags.toggle(LightingFlags::DIFFUSE);
        assert_eq!(flags, LightingFlags::all());
    }

    #[test]
    fn test_bits_match_shader() {
        assert_eq!(LightingFlags::AMBIENT.bits(), 1);
        assert_eq!(LightingFlags::DIFFUSE.bits(), 2);
        assert_eq!(LightingFlags::SPECULAR.bits(), 4);
    }

    #[test]
    fn test_label() {
        assert_eq!(LightingFlags::all().label(), "A D S");
        assert_eq!(LightingFlags::AMBIENT.label(), "A - -");
        assert_eq!(LightingFlags::empty().label(), "- - -");
    }
}
