//! Pipeline control signals and operation types.
//!
//! This module defines the signals that control instruction execution:
//! 1. **Operation Classification:** ALU and FPU operation tags.
//! 2. **Operand Selection:** Sources for the two execute-stage operands.
//! 3. **Memory Control:** Access widths and sign-extension requirements.

/// ALU and FPU operation tags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Default value (addition; also address generation).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Branch condition: equal.
    BranchEq,

    /// Branch condition: not equal.
    BranchNe,

    /// Branch condition: less than, signed.
    BranchLt,

    /// Branch condition: greater or equal, signed.
    BranchGe,

    /// Branch condition: less than, unsigned.
    BranchLtu,

    /// Branch condition: greater or equal, unsigned.
    BranchGeu,

    /// Integer multiply (low 32 bits).
    Mul,

    /// Integer multiply (high bits, signed × signed).
    Mulh,

    /// Integer multiply (high bits, signed × unsigned).
    Mulhsu,

    /// Integer multiply (high bits, unsigned × unsigned).
    Mulhu,

    /// Integer divide (signed).
    Div,

    /// Integer divide (unsigned).
    Divu,

    /// Integer remainder (signed).
    Rem,

    /// Integer remainder (unsigned).
    Remu,

    /// Floating-point addition.
    FAdd,

    /// Floating-point subtraction.
    FSub,

    /// Floating-point multiplication.
    FMul,

    /// Floating-point division.
    FDiv,

    /// Floating-point square root.
    FSqrt,

    /// Floating-point minimum.
    FMin,

    /// Floating-point maximum.
    FMax,

    /// Floating-point sign injection (copy sign).
    FSgnJ,

    /// Floating-point sign injection (negate sign).
    FSgnJn,

    /// Floating-point sign injection (XOR sign).
    FSgnJx,

    /// Floating-point equality comparison.
    FEq,

    /// Floating-point less-than comparison.
    FLt,

    /// Floating-point less-than-or-equal comparison.
    FLe,

    /// Convert single-precision float to signed word.
    FCvtWS,

    /// Convert signed word to single-precision float.
    FCvtSW,

    /// Move floating-point register bits to an integer register.
    FMvXW,

    /// Move integer register bits to a floating-point register.
    FMvWX,

    /// Floating-point classification.
    FClass,
}

impl AluOp {
    /// Whether this tag is one of the branch-condition comparisons.
    pub fn is_branch_compare(self) -> bool {
        matches!(
            self,
            AluOp::BranchEq
                | AluOp::BranchNe
                | AluOp::BranchLt
                | AluOp::BranchGe
                | AluOp::BranchLtu
                | AluOp::BranchGeu
        )
    }

    /// Whether this tag executes on the FPU rather than the integer ALU.
    pub fn is_fp(self) -> bool {
        matches!(
            self,
            AluOp::FAdd
                | AluOp::FSub
                | AluOp::FMul
                | AluOp::FDiv
                | AluOp::FSqrt
                | AluOp::FMin
                | AluOp::FMax
                | AluOp::FSgnJ
                | AluOp::FSgnJn
                | AluOp::FSgnJx
                | AluOp::FEq
                | AluOp::FLt
                | AluOp::FLe
                | AluOp::FCvtWS
                | AluOp::FCvtSW
                | AluOp::FMvXW
                | AluOp::FMvWX
                | AluOp::FClass
        )
    }
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,

    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    Word,
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use the `rs1` register value.
    #[default]
    Reg1,

    /// Use the program counter value.
    Pc,

    /// Use zero.
    Zero,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the sign-extended immediate value.
    #[default]
    Imm,

    /// Use the `rs2` register value.
    Reg2,

    /// Use zero.
    Zero,
}

/// Control signals for pipeline stage execution.
///
/// Contains all signals generated during instruction decode that control
/// execution, memory access, and writeback.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    /// Enable write to the integer destination register.
    pub reg_write: bool,
    /// Enable write to the floating-point destination register.
    pub fp_reg_write: bool,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Writeback selects the loaded value instead of the ALU result.
    pub mem_to_reg: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Instruction is an unconditional jump (JAL/JALR).
    pub jump: bool,
    /// Instruction is LUI or AUIPC.
    pub upper_imm: bool,
    /// `rs1` is read from the floating-point register file.
    pub rs1_fp: bool,
    /// `rs2` is read from the floating-point register file.
    pub rs2_fp: bool,
    /// Width of the memory access.
    pub width: MemWidth,
    /// Loads narrower than a word are sign-extended.
    pub signed_load: bool,
    /// ALU or FPU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
}
