use super::super::MoleculeTestCase;

pub const BENZENE: MoleculeTestCase = MoleculeTestCase {
    name: "benzene",
    notation: "L6J",
    heavy_atoms: &[
        (6, 0, 1),
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

pub const TOLUENE: MoleculeTestCase = MoleculeTestCase {
    name: "toluene",
    notation: "1R",
    heavy_atoms: &[
        (6, 0, 3),
        (6, 0, 0),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 2, 2, 2],
    aromatic_atoms: 6,
};

pub const TOLUENE_CONTRACTION: MoleculeTestCase = MoleculeTestCase {
    name: "toluene by locant contraction",
    notation: "L6J B",
    heavy_atoms: &[
        (6, 0, 0),
        (6, 0, 0),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
    ],
    explicit_hydrogens: 3,
    bond_orders: &[1, 1, 1, 1, 1, 1, 1, 2, 2, 2],
    aromatic_atoms: 6,
};

pub const XYLENE: MoleculeTestCase = MoleculeTestCase {
    name: "xylene by double contraction",
    notation: "L6J A B",
    heavy_atoms: &[
        (6, 0, 0),
        (6, 0, 0),
        (6, 0, 0),
        (6, 0, 0),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
    ],
    explicit_hydrogens: 6,
    bond_orders: &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 2, 2],
    aromatic_atoms: 6,
};

pub const PYRIDINE: MoleculeTestCase = MoleculeTestCase {
    name: "pyridine",
    notation: "T6NJ",
    heavy_atoms: &[
        (7, 0, 0),
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

pub const PIPERIDINE: MoleculeTestCase = MoleculeTestCase {
    name: "piperidine",
    notation: "T6MTJ",
    heavy_atoms: &[
        (7, 0, 1),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1, 1],
    aromatic_atoms: 0,
};

pub const PYRROLE: MoleculeTestCase = MoleculeTestCase {
    name: "pyrrole",
    notation: "T5MJ",
    heavy_atoms: &[(7, 0, 1), (6, 0, 1), (6, 0, 1), (6, 0, 1), (6, 0, 1)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 2, 2],
    aromatic_atoms: 5,
};

pub const FURAN: MoleculeTestCase = MoleculeTestCase {
    name: "furan",
    notation: "T5OJ",
    heavy_atoms: &[(8, 0, 0), (6, 0, 1), (6, 0, 1), (6, 0, 1), (6, 0, 1)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 2, 2],
    aromatic_atoms: 5,
};

pub const NAPHTHALENE: MoleculeTestCase = MoleculeTestCase {
    name: "naphthalene",
    notation: "L66J",
    heavy_atoms: &[
        (6, 0, 0),
        (6, 0, 0),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2],
    aromatic_atoms: 10,
};

pub const FUSED_PYRROLE: MoleculeTestCase = MoleculeTestCase {
    name: "fused bicyclic with ring NH",
    notation: "T56 BMJ",
    heavy_atoms: &[
        (7, 0, 1),
        (6, 0, 0),
        (6, 0, 0),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1, 1, 2, 2, 2, 2],
    aromatic_atoms: 9,
};

pub const CYCLOHEXENE: MoleculeTestCase = MoleculeTestCase {
    name: "cyclohexene",
    notation: "L6UTJ",
    heavy_atoms: &[
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1, 2],
    aromatic_atoms: 0,
};

pub const NH_SUBSTITUTED_RING: MoleculeTestCase = MoleculeTestCase {
    name: "carbocyclic six-ring with NH at locant A",
    notation: "L6 AMJ",
    heavy_atoms: &[
        (7, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 2),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 2, 2],
    aromatic_atoms: 6,
};

pub const SPIRO_NONANE: MoleculeTestCase = MoleculeTestCase {
    name: "spiro[4.4]nonane",
    notation: "L5TJ A-&L5TJ",
    heavy_atoms: &[
        (6, 0, 0),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    aromatic_atoms: 0,
};

pub const NORBORNANE: MoleculeTestCase = MoleculeTestCase {
    name: "norbornane",
    notation: "L55 ATJ",
    heavy_atoms: &[
        (6, 0, 1),
        (6, 0, 1),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
        (6, 0, 2),
    ],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1, 1, 1, 1],
    aromatic_atoms: 0,
};

pub const STANNACYCLOPENTANE: MoleculeTestCase = MoleculeTestCase {
    name: "stannacyclopentane",
    notation: "T5 A-SN-TJ",
    heavy_atoms: &[(50, 0, 0), (6, 0, 2), (6, 0, 2), (6, 0, 2), (6, 0, 2)],
    explicit_hydrogens: 0,
    bond_orders: &[1, 1, 1, 1, 1],
    aromatic_atoms: 0,
};
