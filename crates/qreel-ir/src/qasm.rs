//! OpenQASM 3 emitter for spin circuits.
//!
//! Hardware submission serializes the circuit as QASM 3 source. The output
//! omits `include "stdgates.inc";`; the adapter that needs it inserts the
//! include after the version header.

use crate::circuit::{Instruction, SpinCircuit};

/// Emit a spin circuit as OpenQASM 3 source code.
pub fn emit(circuit: &SpinCircuit) -> String {
    let mut emitter = Emitter::new();
    emitter.emit_circuit(circuit)
}

struct Emitter {
    output: String,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &SpinCircuit) -> String {
        self.writeln("OPENQASM 3.0;");
        self.writeln("");

        let n = circuit.num_qubits();
        self.writeln(&format!("qubit[{n}] q;"));
        self.writeln(&format!("bit[{n}] c;"));
        self.writeln("");

        for instruction in circuit.instructions() {
            match instruction {
                Instruction::Ry { qubit, theta } => {
                    self.writeln(&format!("ry({theta}) q[{qubit}];"));
                }
                Instruction::Cx { control, target } => {
                    self.writeln(&format!("cx q[{control}], q[{target}];"));
                }
                Instruction::Measure { qubit } => {
                    self.writeln(&format!("c[{qubit}] = measure q[{qubit}];"));
                }
            }
        }

        std::mem::take(&mut self.output)
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}
