use crate::datatypes::BinaryData;

pub(crate) struct SimplePackingParam {
    pub(crate) ref_val: f64,
    pub(crate) exp: i16,
    pub(crate) dig: i16,
    pub(crate) nbit: u8,
}

impl SimplePackingParam {
    pub(crate) fn new(ref_val: f64, exp: i16, dig: i16, nbit: u8) -> Self {
        Self {
            ref_val,
            exp,
            dig,
            nbit,
        }
    }

    /// Collects the packing parameters from the Binary Data Section and the
    /// decimal scale factor of the Product Definition Section.
    pub(crate) fn from_sections(binary_data: &BinaryData, decimal_scale_factor: i16) -> Self {
        Self::new(
            binary_data.reference_value(),
            binary_data.binary_scale_factor,
            decimal_scale_factor,
            binary_data.bits_per_value,
        )
    }

    /// Value of a point whose packed value is `encoded`:
    /// `(R + X * 2^E) / 10^D`.
    pub(crate) fn unpack(&self, encoded: f64) -> f64 {
        let diff = encoded * 2_f64.powi(self.exp.into());
        (self.ref_val + diff) / 10_f64.powi(self.dig.into())
    }
}
