use std::fmt;

/// One decoded trace line.
///
/// Every field except `clock` is produced by both layouts. A record without a
/// clock is never treated as having a zero clock: comparisons skip the field
/// unless both sides carry it.
#[derive(Debug, Clone)]
pub struct Instruction {
    /// Mnemonic, upper-cased.
    pub name: String,
    /// Program counter the instruction was fetched from.
    pub address: u16,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    /// Processor status byte.
    pub p: u8,
    /// Stack pointer (low byte).
    pub sp: u8,
    /// Cumulative cycle count, when the layout records one.
    pub clock: Option<u64>,
}

impl Instruction {
    /// Fields whose values disagree, in diagnostic order.
    #[must_use]
    pub fn differing_fields(&self, other: &Self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|&field| match (self.value(field), other.value(field)) {
                (Some(lhs), Some(rhs)) => lhs != rhs,
                _ => false,
            })
            .collect()
    }

    /// Value of a single field, `None` for an absent clock.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        let value = match field {
            Field::Name => FieldValue::Name(&self.name),
            Field::Address => FieldValue::Word(self.address),
            Field::X => FieldValue::Byte(self.x),
            Field::Y => FieldValue::Byte(self.y),
            Field::A => FieldValue::Byte(self.a),
            Field::Sp => FieldValue::Byte(self.sp),
            Field::P => FieldValue::Byte(self.p),
            Field::Clock => FieldValue::Count(self.clock?),
        };
        Some(value)
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.differing_fields(other).is_empty()
    }
}

/// A comparable field of an [`Instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Address,
    X,
    Y,
    A,
    Sp,
    P,
    Clock,
}

impl Field {
    /// All fields in the order mismatches are reported.
    pub const ALL: [Self; 8] = [
        Self::Name,
        Self::Address,
        Self::X,
        Self::Y,
        Self::A,
        Self::Sp,
        Self::P,
        Self::Clock,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Address => "address",
            Self::X => "x",
            Self::Y => "y",
            Self::A => "a",
            Self::Sp => "sp",
            Self::P => "p",
            Self::Clock => "clock",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Borrowed view of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Name(&'a str),
    Word(u16),
    Byte(u8),
    Count(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jmp(clock: Option<u64>) -> Instruction {
        Instruction {
            name: "JMP".to_string(),
            address: 0xC000,
            a: 0,
            x: 0,
            y: 0,
            p: 0x24,
            sp: 0xFD,
            clock,
        }
    }

    #[test]
    fn test_absent_clock_is_not_zero() {
        assert_eq!(jmp(None), jmp(Some(7)));
        assert_eq!(jmp(Some(7)), jmp(None));
        assert_ne!(jmp(Some(0)), jmp(Some(7)));
        assert!(jmp(None).differing_fields(&jmp(Some(0))).is_empty());
    }

    #[test]
    fn test_differing_fields_order() {
        let mut other = jmp(Some(8));
        other.p = 0x25;
        other.name = "JSR".to_string();
        other.a = 1;

        assert_eq!(
            jmp(Some(7)).differing_fields(&other),
            vec![Field::Name, Field::A, Field::P, Field::Clock]
        );
    }

    #[test]
    fn test_equality_is_symmetric() {
        let lhs = jmp(Some(7));
        let mut rhs = jmp(Some(7));
        assert_eq!(lhs, rhs);
        rhs.sp = 0xFB;
        assert_ne!(lhs, rhs);
        assert_ne!(rhs, lhs);
    }

    #[test]
    fn test_value_of_absent_clock() {
        assert_eq!(jmp(None).value(Field::Clock), None);
        assert_eq!(jmp(Some(3)).value(Field::Clock), Some(FieldValue::Count(3)));
        assert_eq!(jmp(None).value(Field::Address), Some(FieldValue::Word(0xC000)));
    }
}
