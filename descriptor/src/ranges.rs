use std::ops::{Add, AddAssign};

const REGISTER_KINDS_COUNT: usize = 4;

/// HLSL register class a descriptor is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub enum RegisterKind {
    /// `b#` registers. Constant buffer views.
    ConstantBuffer,
    /// `t#` registers. Shader resource views.
    ShaderResource,
    /// `u#` registers. Unordered access views.
    UnorderedAccess,
    /// `s#` registers. Samplers.
    Sampler,
}

impl RegisterKind {
    /// All register kinds in table order.
    pub const ALL: [RegisterKind; REGISTER_KINDS_COUNT] = [
        RegisterKind::ConstantBuffer,
        RegisterKind::ShaderResource,
        RegisterKind::UnorderedAccess,
        RegisterKind::Sampler,
    ];

    /// Check if descriptors of this kind live in sampler heaps.
    pub fn is_sampler(self) -> bool {
        self == RegisterKind::Sampler
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Number of descriptors of each register kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptorRanges {
    counts: [u32; REGISTER_KINDS_COUNT],
}

impl DescriptorRanges {
    /// No descriptors.
    pub fn zero() -> Self {
        DescriptorRanges {
            counts: [0; REGISTER_KINDS_COUNT],
        }
    }

    /// Ranges with `count` descriptors of `kind`.
    pub fn with(mut self, kind: RegisterKind, count: u32) -> Self {
        self.counts[kind.index()] = count;
        self
    }

    /// Number of descriptors of `kind`.
    pub fn count(&self, kind: RegisterKind) -> u32 {
        self.counts[kind.index()]
    }

    /// Number of descriptors that go into CBV/SRV/UAV heaps.
    pub fn views(&self) -> u32 {
        RegisterKind::ALL
            .iter()
            .filter(|kind| !kind.is_sampler())
            .map(|&kind| self.count(kind))
            .sum()
    }

    /// Number of descriptors that go into sampler heaps.
    pub fn samplers(&self) -> u32 {
        self.count(RegisterKind::Sampler)
    }

    /// Position of the first `kind` descriptor among descriptors of the same heap.
    pub fn offset(&self, kind: RegisterKind) -> u32 {
        RegisterKind::ALL
            .iter()
            .take_while(|&&k| k != kind)
            .filter(|k| k.is_sampler() == kind.is_sampler())
            .map(|&k| self.count(k))
            .sum()
    }
}

impl Add for DescriptorRanges {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for DescriptorRanges {
    fn add_assign(&mut self, rhs: Self) {
        for i in 0..REGISTER_KINDS_COUNT {
            self.counts[i] += rhs.counts[i];
        }
    }
}
