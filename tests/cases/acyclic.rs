use super::super::MoleculeTestCase;

pub const ETHANE: MoleculeTestCase = MoleculeTestCase {
    name: "ethane",
    notation: "2",
    heavy_atoms: &[(6, 0, 3), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const ETHENE: MoleculeTestCase = MoleculeTestCase {
    name: "ethene",
    notation: "1U1",
    heavy_atoms: &[(6, 0, 2), (6, 0, 2)],
    explicit_hydrogens: 0,
    bond_orders: &[2],
    aromatic_atoms: 0,
};

pub const ETHYNE: MoleculeTestCase = MoleculeTestCase {
    name: "ethyne",
    notation: "1UU1",
    heavy_atoms: &[(6, 0, 1), (6, 0, 1)],
    explicit_hydrogens: 0,
    bond_orders: &[3],
    aromatic_atoms: 0,
};

pub const METHANOL: MoleculeTestCase = MoleculeTestCase {
    name: "methanol",
    notation: "Q1",
    heavy_atoms: &[(8, 0, 1), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const ISOPROPANOL: MoleculeTestCase = MoleculeTestCase {
    name: "isopropanol",
    notation: "QY",
    heavy_atoms: &[(8, 0, 1), (6, 0, 1), (6, 0, 0), (6, 0, 0)],
    explicit_hydrogens: 6,
    bond_orders: &[1, 1, 1, 1, 1, 1, 1, 1, 1],
    aromatic_atoms: 0,
};

pub const ETHYL_ESTER: MoleculeTestCase = MoleculeTestCase {
    name: "ethyl acetate skeleton",
    notation: "1VO2",
    heavy_atoms: &[
        (6, 0, 3),
        (6, 0, 0),
        (8, 0, 0),
        (8, 0, 0),
        (6, 0, 2),
        (6, 0, 3),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 2],
    aromatic_atoms: 0,
};

pub const NITROMETHANE: MoleculeTestCase = MoleculeTestCase {
    name: "nitromethane",
    notation: "WN1",
    heavy_atoms: &[(8, 0, 0), (7, 1, 0), (8, -1, 0), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 2],
    aromatic_atoms: 0,
};

pub const METHYLAMINE: MoleculeTestCase = MoleculeTestCase {
    name: "methylamine",
    notation: "Z1",
    heavy_atoms: &[(7, 0, 2), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const AMMONIA: MoleculeTestCase = MoleculeTestCase {
    name: "ammonia",
    notation: "ZH",
    heavy_atoms: &[(7, 0, 2)],
    explicit_hydrogens: 1,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const CHLOROMETHANE: MoleculeTestCase = MoleculeTestCase {
    name: "chloromethane",
    notation: "G1",
    heavy_atoms: &[(17, 0, 0), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const METHYL_TIN: MoleculeTestCase = MoleculeTestCase {
    name: "methyl tin",
    notation: "-SN-1",
    heavy_atoms: &[(50, 0, 0), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1],
    aromatic_atoms: 0,
};

pub const ACETONITRILE: MoleculeTestCase = MoleculeTestCase {
    name: "acetonitrile",
    notation: "1CN",
    heavy_atoms: &[(6, 0, 3), (6, 0, 0), (7, 0, 0)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 3],
    aromatic_atoms: 0,
};

pub const ACETIC_ACID: MoleculeTestCase = MoleculeTestCase {
    name: "acetic acid",
    notation: "QV1",
    heavy_atoms: &[(8, 0, 1), (6, 0, 0), (8, 0, 0), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 2],
    aromatic_atoms: 0,
};

pub const NEOPENTANE: MoleculeTestCase = MoleculeTestCase {
    name: "neopentane",
    notation: "1X",
    heavy_atoms: &[(6, 0, 3), (6, 0, 0), (6, 0, 0), (6, 0, 0), (6, 0, 0)],
    explicit_hydrogens: 9,
    bond_orders: &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    aromatic_atoms: 0,
};

pub const ISOBUTANE: MoleculeTestCase = MoleculeTestCase {
    name: "isobutane",
    notation: "1Y1&1",
    heavy_atoms: &[(6, 0, 3), (6, 0, 1), (6, 0, 3), (6, 0, 3)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1],
    aromatic_atoms: 0,
};
