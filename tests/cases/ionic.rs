use super::super::MoleculeTestCase;

pub const ALCOHOL_FRAGMENTS: MoleculeTestCase = MoleculeTestCase {
    name: "methanol and ethanol fragments",
    notation: "Q1 &Q2",
    heavy_atoms: &[(8, 0, 1), (6, 0, 3), (8, 0, 1), (6, 0, 2), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1],
    aromatic_atoms: 0,
};

pub const METHYLAMMONIUM_CHLORIDE: MoleculeTestCase = MoleculeTestCase {
    name: "methylammonium chloride",
    notation: "Z1 &G &1/5",
    heavy_atoms: &[(7, 1, 2), (6, 0, 3), (17, -1, 0)],
    explicit_hydrogens: 0,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const PYRIDINIUM: MoleculeTestCase = MoleculeTestCase {
    name: "pyridinium by trailing charge",
    notation: "T6NJ &3/0",
    heavy_atoms: &[
        (7, 1, 0),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 2, 2, 2],
    aromatic_atoms: 6,
};

pub const CYCLOPENTADIENIDE: MoleculeTestCase = MoleculeTestCase {
    name: "cyclopentadienide pi charge",
    notation: "T5 0J",
    heavy_atoms: &[(6, 0, 1), (6, -1, 0), (6, 0, 1), (6, 0, 1), (6, 0, 2)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 2, 2],
    aromatic_atoms: 5,
};
