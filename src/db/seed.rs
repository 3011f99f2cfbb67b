use crate::models::NewProject;

/// Rows inserted the first time the store is initialized, in insertion order.
const SEED_ROWS: [(&str, &str, &str, &str); 12] = [
    (
        "Sistema de Vigilância Urbana GCPD",
        "Rede de câmeras e sensores integrada ao Departamento de Polícia de Gotham",
        "comercial",
        "gerente",
    ),
    (
        "Wayne Tech Energia Limpa",
        "Reator de fusão compacto para abastecer os bairros industriais de Gotham",
        "comercial",
        "publico",
    ),
    (
        "Drones Logísticos Wayne Aerospace",
        "Frota autônoma de entregas para hospitais e centros de distribuição",
        "comercial",
        "gerente",
    ),
    (
        "Biomateriais WayneCorp",
        "Polímeros regenerativos para próteses e implantes médicos",
        "comercial",
        "publico",
    ),
    (
        "Batmóvel Blindado Mark VII",
        "Veículo tático com blindagem composta e modo furtivo",
        "secreto",
        "administrador",
    ),
    (
        "Traje de Combate Tático",
        "Armadura em kevlar e nomex com resistência térmica e balística",
        "secreto",
        "administrador",
    ),
    (
        "Rede de Satélites Oráculo",
        "Constelação privada de comunicação criptografada sobre Gotham",
        "secreto",
        "administrador",
    ),
    (
        "Gancho Magnético Retrátil",
        "Lançador de cabo com ímã de alta potência para deslocamento vertical",
        "secreto",
        "gerente",
    ),
    (
        "Fundação Wayne Bolsas de Estudo",
        "Programa de bolsas para jovens de baixa renda de Gotham",
        "publico",
        "publico",
    ),
    (
        "Hospital Infantil Thomas Wayne",
        "Ampliação da ala pediátrica e do centro de pesquisa em oncologia",
        "publico",
        "publico",
    ),
    (
        "Revitalização do Parque Robinson",
        "Recuperação de áreas verdes e iluminação pública no centro da cidade",
        "publico",
        "publico",
    ),
    (
        "Programa de Reabilitação Arkham",
        "Acompanhamento psicológico e profissional para egressos do Asilo Arkham",
        "publico",
        "gerente",
    ),
];

pub const SEED_COUNT: usize = SEED_ROWS.len();

pub fn seed_projects() -> Vec<NewProject> {
    SEED_ROWS
        .iter()
        .map(|(name, description, category, access_level)| {
            NewProject::new(*name, *description, *category, *access_level)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_covers_each_category_four_times() {
        let seeds = seed_projects();
        assert_eq!(seeds.len(), 12);
        for category in ["comercial", "secreto", "publico"] {
            assert_eq!(seeds.iter().filter(|p| p.category == category).count(), 4);
        }
        assert_eq!(seeds[0].name, "Sistema de Vigilância Urbana GCPD");
    }
}
